use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// A field or property of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMember {
    pub name: String,
    pub type_name: Option<String>,
    pub is_optional: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalArgument {
    pub name: String,
    pub type_name: Option<String>,
    pub is_optional: bool,
    pub is_rest: bool,
}

/// A method, or the constructor when `is_constructor` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMethod {
    pub name: String,
    pub arguments: Vec<ExternalArgument>,
    pub return_type: Option<String>,
    pub is_static: bool,
    pub is_constructor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEnumMember {
    pub name: String,
    pub value: Option<String>,
}

/// A class, interface or enum declared in a client-side source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalType {
    /// Dotted namespace path; empty for module-scoped types.
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    /// Project-relative module path (`/Modules/Foo/FooGrid`) for types
    /// declared in ES module files.
    pub module: Option<String>,
    pub base_type: Option<String>,
    pub interfaces: Vec<String>,
    pub generic_parameters: Vec<String>,
    pub is_abstract: bool,
    pub is_declaration: bool,
    pub is_export: bool,
    pub attributes: Vec<String>,
    pub fields: Vec<ExternalMember>,
    pub methods: Vec<ExternalMethod>,
    pub enum_members: Vec<ExternalEnumMember>,
    pub source_file: String,
}

impl ExternalType {
    pub fn new(
        kind: TypeKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            module: None,
            base_type: None,
            interfaces: Vec::new(),
            generic_parameters: Vec::new(),
            is_abstract: false,
            is_declaration: false,
            is_export: false,
            attributes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            enum_members: Vec::new(),
            source_file: source_file.into(),
        }
    }

    /// `Namespace.Name`, or just `Name` outside a namespace.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let global = ExternalType::new(TypeKind::Class, "", "Grid", "/p/Grid.ts");
        assert_eq!(global.full_name(), "Grid");

        let nested = ExternalType::new(TypeKind::Enum, "Serenity.Demo", "Status", "/p/S.ts");
        assert_eq!(nested.full_name(), "Serenity.Demo.Status");
    }

    #[test]
    fn test_serializes_camel_case() {
        let ty = ExternalType::new(TypeKind::Interface, "App", "Options", "/p/O.ts");
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(json["kind"], "interface");
        assert_eq!(json["sourceFile"], "/p/O.ts");
        assert!(json.get("genericParameters").is_some());
    }
}
