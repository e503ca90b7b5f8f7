//! Collects class, interface and enum declarations from a parsed file.

use std::collections::HashSet;

use swc_ecma_ast::{
    Accessibility, BlockStmt, Callee, Class, ClassMember, Decl, DefaultDecl, ExportDecl,
    ExportDefaultDecl, ExportSpecifier, Expr, Function, Lit, MethodKind, Module, ModuleDecl,
    ModuleExportName, ModuleItem, ParamOrTsParamProp, Pat, PropName, Stmt, TsEnumDecl,
    TsEnumMemberId, TsFnParam, TsInterfaceDecl, TsModuleDecl, TsModuleName, TsModuleRef,
    TsNamespaceDecl, TsParamPropParam, TsTypeElement, TsTypeParamDecl, UnaryOp,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{
    render::{
        pat_name, pat_type_ann, render_expr_with_type_args, render_heritage_expr, render_type_ann,
        render_type_args,
    },
    types::{
        ExternalArgument, ExternalEnumMember, ExternalMember, ExternalMethod, ExternalType,
        TypeKind,
    },
};

/// Whether a file is an ES module rather than a global script.
///
/// `import x = A.B` aliases do not make a file a module; every other
/// top-level import or export does.
pub fn is_module_file(module: &Module) -> bool {
    module.body.iter().any(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::TsImportEquals(import)) => {
            import.is_export || matches!(import.module_ref, TsModuleRef::TsExternalModuleRef(_))
        }
        ModuleItem::ModuleDecl(_) => true,
        ModuleItem::Stmt(_) => false,
    })
}

/// Names of local declarations exported through `export { A, B }`.
fn named_exports(module: &Module) -> HashSet<String> {
    let mut names = HashSet::new();
    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)) = item else {
            continue;
        };
        if export.src.is_some() {
            continue;
        }
        for specifier in &export.specifiers {
            if let ExportSpecifier::Named(named) = specifier
                && let ModuleExportName::Ident(orig) = &named.orig
            {
                names.insert(orig.sym.to_string());
            }
        }
    }
    names
}

pub struct TypeCollector {
    source_file: String,
    is_dts: bool,
    is_module: bool,
    /// Module path attached to collected types.
    module: Option<String>,
    named_exports: HashSet<String>,
    namespace: Vec<String>,
    /// Nesting of namespace and module blocks.
    depth: usize,
    ambient_depth: usize,
    /// Set by `export` for the declaration that follows it.
    exporting: bool,
    /// False once inside a namespace that is not reachable from outside.
    scope_visible: bool,
    pub types: Vec<ExternalType>,
}

impl TypeCollector {
    pub fn new(source_file: impl Into<String>, is_dts: bool, module_path: Option<String>) -> Self {
        Self {
            source_file: source_file.into(),
            is_dts,
            is_module: module_path.is_some(),
            module: module_path,
            named_exports: HashSet::new(),
            namespace: Vec::new(),
            depth: 0,
            ambient_depth: 0,
            exporting: false,
            scope_visible: true,
            types: Vec::new(),
        }
    }

    /// Walk `module` and return the collected types in source order.
    pub fn collect(mut self, module: &Module) -> Vec<ExternalType> {
        self.named_exports = named_exports(module);
        module.visit_with(&mut self);
        self.types
    }

    fn is_ambient(&self) -> bool {
        self.ambient_depth > 0 || self.is_dts
    }

    fn is_visible(&self, name: &str, exported: bool) -> bool {
        if !self.scope_visible {
            return false;
        }
        if self.depth == 0 {
            return !self.is_module || exported || self.named_exports.contains(name);
        }
        exported || self.is_ambient()
    }

    fn new_type(&self, kind: TypeKind, name: String, exported: bool, declare: bool) -> ExternalType {
        let mut ty = ExternalType::new(kind, self.namespace.join("."), name, &self.source_file);
        ty.module = self.module.clone();
        ty.is_export = exported;
        ty.is_declaration = declare || self.is_ambient();
        ty
    }

    fn collect_class(&mut self, name: String, class: &Class, exported: bool, declare: bool) {
        if !self.is_visible(&name, exported) {
            return;
        }
        let mut ty = self.new_type(TypeKind::Class, name, exported, declare);
        ty.is_abstract = class.is_abstract;
        ty.generic_parameters = type_param_names(class.type_params.as_deref());
        ty.base_type = class.super_class.as_deref().and_then(|expr| {
            render_heritage_expr(expr).map(|base| {
                format!(
                    "{}{}",
                    base,
                    render_type_args(class.super_type_params.as_deref())
                )
            })
        });
        ty.interfaces = class
            .implements
            .iter()
            .filter_map(render_expr_with_type_args)
            .collect();
        ty.attributes = class
            .decorators
            .iter()
            .filter_map(|decorator| decorator_name(&decorator.expr))
            .collect();

        for member in &class.body {
            collect_class_member(&mut ty, member);
        }

        self.types.push(ty);
    }

    fn collect_interface(&mut self, decl: &TsInterfaceDecl, exported: bool) {
        let name = decl.id.sym.to_string();
        if !self.is_visible(&name, exported) {
            return;
        }
        let mut ty = self.new_type(TypeKind::Interface, name, exported, decl.declare);
        ty.generic_parameters = type_param_names(decl.type_params.as_deref());

        let mut bases = decl.extends.iter().filter_map(render_expr_with_type_args);
        ty.base_type = bases.next();
        ty.interfaces = bases.collect();

        for element in &decl.body.body {
            match element {
                TsTypeElement::TsPropertySignature(prop) if !prop.computed => {
                    if let Some(name) = expr_key_name(&prop.key) {
                        ty.fields.push(ExternalMember {
                            name,
                            type_name: prop.type_ann.as_deref().map(render_type_ann),
                            is_optional: prop.optional,
                            is_static: false,
                        });
                    }
                }
                TsTypeElement::TsGetterSignature(getter) if !getter.computed => {
                    if let Some(name) = expr_key_name(&getter.key) {
                        ty.fields.push(ExternalMember {
                            name,
                            type_name: getter.type_ann.as_deref().map(render_type_ann),
                            is_optional: false,
                            is_static: false,
                        });
                    }
                }
                TsTypeElement::TsMethodSignature(method) if !method.computed => {
                    if let Some(name) = expr_key_name(&method.key) {
                        ty.methods.push(ExternalMethod {
                            name,
                            arguments: method.params.iter().map(fn_param_argument).collect(),
                            return_type: method.type_ann.as_deref().map(render_type_ann),
                            is_static: false,
                            is_constructor: false,
                        });
                    }
                }
                _ => {}
            }
        }

        self.types.push(ty);
    }

    fn collect_enum(&mut self, decl: &TsEnumDecl, exported: bool) {
        let name = decl.id.sym.to_string();
        if !self.is_visible(&name, exported) {
            return;
        }
        let mut ty = self.new_type(TypeKind::Enum, name, exported, decl.declare);
        ty.enum_members = decl
            .members
            .iter()
            .filter_map(|member| {
                let name = match &member.id {
                    TsEnumMemberId::Ident(ident) => ident.sym.to_string(),
                    TsEnumMemberId::Str(s) => s.value.as_str()?.to_string(),
                };
                Some(ExternalEnumMember {
                    name,
                    value: member.init.as_deref().and_then(enum_value),
                })
            })
            .collect();
        self.types.push(ty);
    }

    fn enter_module_decl(&mut self, decl: &TsModuleDecl, exported: bool) {
        let Some(body) = &decl.body else {
            return;
        };

        let saved_module = self.module.clone();
        let saved_visible = self.scope_visible;
        let saved_namespace_len = self.namespace.len();

        if decl.global {
            self.module = None;
        } else {
            match &decl.id {
                TsModuleName::Ident(ident) => {
                    let name = ident.sym.to_string();
                    self.scope_visible = self.is_visible(&name, exported);
                    self.namespace.push(name);
                }
                TsModuleName::Str(s) => {
                    self.module = s.value.as_str().map(str::to_string);
                }
            }
        }

        let ambient = decl.declare || decl.global || matches!(decl.id, TsModuleName::Str(_));
        if ambient {
            self.ambient_depth += 1;
        }
        self.depth += 1;

        body.visit_with(self);

        self.depth -= 1;
        if ambient {
            self.ambient_depth -= 1;
        }
        self.namespace.truncate(saved_namespace_len);
        self.scope_visible = saved_visible;
        self.module = saved_module;
    }
}

impl Visit for TypeCollector {
    fn visit_export_decl(&mut self, node: &ExportDecl) {
        self.exporting = true;
        node.decl.visit_with(self);
        self.exporting = false;
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        match &node.decl {
            DefaultDecl::Class(class_expr) => {
                if let Some(ident) = &class_expr.ident {
                    self.collect_class(ident.sym.to_string(), &class_expr.class, true, false);
                }
            }
            DefaultDecl::TsInterfaceDecl(decl) => self.collect_interface(decl, true),
            DefaultDecl::Fn(_) => {}
        }
    }

    fn visit_decl(&mut self, node: &Decl) {
        let exported = std::mem::take(&mut self.exporting);
        match node {
            Decl::Class(class_decl) => self.collect_class(
                class_decl.ident.sym.to_string(),
                &class_decl.class,
                exported,
                class_decl.declare,
            ),
            Decl::TsInterface(decl) => self.collect_interface(decl, exported),
            Decl::TsEnum(decl) => self.collect_enum(decl, exported),
            Decl::TsModule(decl) => self.enter_module_decl(decl, exported),
            _ => {}
        }
    }

    /// Dotted namespaces (`namespace A.B`) nest one segment per level.
    fn visit_ts_namespace_decl(&mut self, node: &TsNamespaceDecl) {
        let saved_visible = self.scope_visible;
        if node.declare {
            self.ambient_depth += 1;
        }
        self.namespace.push(node.id.sym.to_string());

        node.body.visit_with(self);

        self.namespace.pop();
        if node.declare {
            self.ambient_depth -= 1;
        }
        self.scope_visible = saved_visible;
    }

    // types declared inside function bodies are local
    fn visit_block_stmt(&mut self, _node: &BlockStmt) {}

    fn visit_stmt(&mut self, node: &Stmt) {
        if let Stmt::Decl(decl) = node {
            self.visit_decl(decl);
        }
    }
}

fn type_param_names(params: Option<&TsTypeParamDecl>) -> Vec<String> {
    params
        .map(|decl| decl.params.iter().map(|p| p.name.sym.to_string()).collect())
        .unwrap_or_default()
}

/// `@Decorators.registerClass('x')` yields `Decorators.registerClass`.
fn decorator_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => render_heritage_expr(callee),
            _ => None,
        },
        other => render_heritage_expr(other),
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

fn expr_key_name(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        _ => None,
    }
}

fn is_private(accessibility: Option<Accessibility>) -> bool {
    matches!(accessibility, Some(Accessibility::Private))
}

fn collect_class_member(ty: &mut ExternalType, member: &ClassMember) {
    match member {
        ClassMember::Constructor(ctor) => {
            let mut arguments = Vec::new();
            for (index, param) in ctor.params.iter().enumerate() {
                match param {
                    ParamOrTsParamProp::Param(param) => {
                        arguments.push(pat_argument(&param.pat, index));
                    }
                    ParamOrTsParamProp::TsParamProp(prop) => {
                        let argument = match &prop.param {
                            TsParamPropParam::Ident(binding) => ExternalArgument {
                                name: binding.id.sym.to_string(),
                                type_name: binding.type_ann.as_deref().map(render_type_ann),
                                is_optional: binding.id.optional,
                                is_rest: false,
                            },
                            TsParamPropParam::Assign(assign) => {
                                let mut argument = pat_argument(&assign.left, index);
                                argument.is_optional = true;
                                argument
                            }
                        };
                        if !is_private(prop.accessibility) {
                            ty.fields.push(ExternalMember {
                                name: argument.name.clone(),
                                type_name: argument.type_name.clone(),
                                is_optional: argument.is_optional,
                                is_static: false,
                            });
                        }
                        arguments.push(argument);
                    }
                }
            }
            ty.methods.push(ExternalMethod {
                name: "constructor".to_string(),
                arguments,
                return_type: None,
                is_static: false,
                is_constructor: true,
            });
        }
        ClassMember::Method(method) if !is_private(method.accessibility) => {
            let Some(name) = prop_name(&method.key) else {
                return;
            };
            match method.kind {
                MethodKind::Method => ty.methods.push(ExternalMethod {
                    name,
                    arguments: function_arguments(&method.function),
                    return_type: method.function.return_type.as_deref().map(render_type_ann),
                    is_static: method.is_static,
                    is_constructor: false,
                }),
                MethodKind::Getter => ty.fields.push(ExternalMember {
                    name,
                    type_name: method.function.return_type.as_deref().map(render_type_ann),
                    is_optional: false,
                    is_static: method.is_static,
                }),
                MethodKind::Setter => {}
            }
        }
        ClassMember::ClassProp(prop) if !is_private(prop.accessibility) => {
            if let Some(name) = prop_name(&prop.key) {
                ty.fields.push(ExternalMember {
                    name,
                    type_name: prop.type_ann.as_deref().map(render_type_ann),
                    is_optional: prop.is_optional,
                    is_static: prop.is_static,
                });
            }
        }
        _ => {}
    }
}

fn function_arguments(function: &Function) -> Vec<ExternalArgument> {
    function
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| pat_argument(&param.pat, index))
        .collect()
}

fn pat_argument(pat: &Pat, index: usize) -> ExternalArgument {
    match pat {
        Pat::Ident(binding) => ExternalArgument {
            name: binding.id.sym.to_string(),
            type_name: binding.type_ann.as_deref().map(render_type_ann),
            is_optional: binding.id.optional,
            is_rest: false,
        },
        Pat::Rest(rest) => ExternalArgument {
            name: pat_name(&rest.arg).unwrap_or_else(|| format!("arg{index}")),
            type_name: rest
                .type_ann
                .as_deref()
                .or_else(|| pat_type_ann(&rest.arg))
                .map(render_type_ann),
            is_optional: false,
            is_rest: true,
        },
        Pat::Assign(assign) => {
            let mut argument = pat_argument(&assign.left, index);
            argument.is_optional = true;
            argument
        }
        _ => ExternalArgument {
            name: format!("arg{index}"),
            type_name: None,
            is_optional: false,
            is_rest: false,
        },
    }
}

fn fn_param_argument(param: &TsFnParam) -> ExternalArgument {
    match param {
        TsFnParam::Ident(binding) => ExternalArgument {
            name: binding.id.sym.to_string(),
            type_name: binding.type_ann.as_deref().map(render_type_ann),
            is_optional: binding.id.optional,
            is_rest: false,
        },
        TsFnParam::Rest(rest) => ExternalArgument {
            name: pat_name(&rest.arg).unwrap_or_else(|| "args".to_string()),
            type_name: rest
                .type_ann
                .as_deref()
                .or_else(|| pat_type_ann(&rest.arg))
                .map(render_type_ann),
            is_optional: false,
            is_rest: true,
        },
        _ => ExternalArgument {
            name: "arg".to_string(),
            type_name: None,
            is_optional: false,
            is_rest: false,
        },
    }
}

/// Literal initializer text: `1`, `-1`, `"a"`.
fn enum_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Num(n)) => Some(
            n.raw
                .as_ref()
                .map(|raw| raw.to_string())
                .unwrap_or_else(|| n.value.to_string()),
        ),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|value| format!("\"{value}\"")),
        Expr::Unary(unary) if unary.op == UnaryOp::Minus => {
            enum_value(&unary.arg).map(|value| format!("-{value}"))
        }
        Expr::Paren(paren) => enum_value(&paren.expr),
        _ => None,
    }
}
