use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_files_from_config_and_modules_config() -> Result<()> {
    let test = CliTest::with_file("tsconfig.json", r#"{ "include": ["Scripts"] }"#)?;
    test.write_file(
        "Modules/tsconfig.json",
        r#"{ "compilerOptions": { "module": "ES2020" }, "include": ["Modules/**/*"] }"#,
    )?;
    test.write_file("Scripts/Site.ts", "")?;
    test.write_file("Modules/Orders/OrderGrid.ts", "")?;
    test.write_file("node_modules/pkg/index.ts", "")?;

    assert_cmd_snapshot!(test.files_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    strategy: tsconfig
      Scripts/Site.ts
      Modules/Orders/OrderGrid.ts

    ✓ 2 files found (modules: yes, namespaces: yes)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_files_legacy_layout() -> Result<()> {
    let test = CliTest::with_file("Modules/b.ts", "")?;
    test.write_file("Modules/A.ts", "")?;
    test.write_file("Modules/helpers.d.ts", "")?;
    test.write_file("typings/serenity/Serenity.CoreLib.d.ts", "")?;
    test.write_file("wwwroot/Scripts/serenity/Serenity.CoreLib.d.ts", "")?;

    assert_cmd_snapshot!(test.files_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    strategy: legacy
      Modules/A.ts
      Modules/b.ts
      wwwroot/Scripts/serenity/Serenity.CoreLib.d.ts

    ✓ 3 files found (modules: no, namespaces: yes)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_files_module_none() -> Result<()> {
    let test = CliTest::with_file(
        "tsconfig.json",
        r#"{ "compilerOptions": { "module": "None" } }"#,
    )?;
    test.write_file("Scripts/App.ts", "")?;

    let output = test.files_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("(modules: yes, namespaces: yes)"));

    Ok(())
}
