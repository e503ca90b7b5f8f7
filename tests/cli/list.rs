use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

const GRID: &str = r#"
namespace Demo.Orders {
    export class OrderGrid extends Serenity.EntityGrid<OrderRow, any> {}
    export interface OrderRow { OrderId?: number; }
    export enum OrderStatus { Open = 1, Closed = 2 }
}
"#;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_list_legacy_project() -> Result<()> {
    let test = CliTest::with_file("Modules/Orders/OrderGrid.ts", GRID)?;

    assert_cmd_snapshot!(test.list_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    class     Demo.Orders.OrderGrid
    interface Demo.Orders.OrderRow
    enum      Demo.Orders.OrderStatus

    ✓ 3 types found (modules: no, namespaces: yes)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_module_project_json() -> Result<()> {
    let test = CliTest::with_file(
        "tsconfig.json",
        r#"{
  // ES modules
  "compilerOptions": { "module": "ESNext", "outDir": "dist", },
  "include": ["Modules"],
}"#,
    )?;
    test.write_file(
        "Modules/Orders/OrderDialog.ts",
        r#"import { EntityDialog } from "@serenity-is/corelib";
export class OrderDialog extends EntityDialog<any, any> {
    protected getFormKey() { return "Orders.Order"; }
}"#,
    )?;
    test.write_file("dist/Modules/Orders/OrderDialog.ts", "export class Stale {}")?;

    let output = test.list_command().args(["--format", "json"]).output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["hasModules"], true);
    assert_eq!(json["hasNamespaces"], false);

    let types = json["types"].as_array().expect("types array");
    assert_eq!(types.len(), 1);
    assert_eq!(types[0]["name"], "OrderDialog");
    assert_eq!(types[0]["module"], "/Modules/Orders/OrderDialog");
    assert_eq!(types[0]["baseType"], "EntityDialog<any, any>");
    assert_eq!(types[0]["methods"][0]["name"], "getFormKey");

    Ok(())
}

#[test]
fn test_list_with_project_dir() -> Result<()> {
    let test = CliTest::with_file("web/Imports/Helpers.ts", "class Helpers {}")?;

    let output = test
        .list_command()
        .arg("--project-dir")
        .arg(test.root().join("web"))
        .output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("class     Helpers"));

    Ok(())
}

#[test]
fn test_list_nothing_found() -> Result<()> {
    let test = CliTest::with_file("README.md", "no sources")?;

    assert_cmd_snapshot!(test.list_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ no types found (modules: no, namespaces: yes)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_skips_unparsable_file() -> Result<()> {
    let test = CliTest::with_file("Modules/Broken.ts", "export class {")?;
    test.write_file("Modules/Good.ts", "namespace App { export class Good {} }")?;

    let output = test.list_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("App.Good"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Broken.ts"));

    Ok(())
}

#[test]
fn test_list_invalid_pattern_is_an_error() -> Result<()> {
    let test = CliTest::with_file("tsconfig.json", r#"{ "include": ["src/[*.ts"] }"#)?;
    test.write_file("src/a.ts", "class A {}")?;

    let output = test.list_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid glob pattern"));

    Ok(())
}

#[test]
fn test_missing_project_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .list_command()
        .args(["--project-dir", "does-not-exist"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));

    Ok(())
}
