//! Module system posture of a project.

use serde::Serialize;

/// Value of `compilerOptions.module` in a tsconfig.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModuleMode {
    /// The field is absent (or `null`).
    #[default]
    Unset,
    /// The field is the literal `"none"` (any case).
    None,
    /// Any other module kind, e.g. `"ES2020"` or `"commonjs"`.
    Named(String),
}

impl ModuleMode {
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Option::None => Self::Unset,
            Some(value) if value.eq_ignore_ascii_case("none") => Self::None,
            Some(value) => Self::Named(value.to_string()),
        }
    }

    /// `Unset` and `None` both mean the config compiles global namespace code.
    pub fn is_namespace_style(&self) -> bool {
        matches!(self, Self::Unset | Self::None)
    }

    /// Any present value counts as a module signal, including `"none"`.
    ///
    /// Together with [`ModuleMode::is_namespace_style`] this makes `"none"`
    /// set both posture flags. Downstream generation depends on that, so
    /// it stays until the behaviour is confirmed as unwanted.
    pub fn signals_modules(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Whether a project uses ES modules, global namespaces, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePosture {
    pub has_modules: bool,
    pub has_namespaces: bool,
}

impl ModulePosture {
    /// Merge the flags contributed by one config's module mode.
    pub fn absorb(&mut self, mode: &ModuleMode) {
        if mode.is_namespace_style() {
            self.has_namespaces = true;
        }
        if mode.signals_modules() {
            self.has_modules = true;
        }
    }

    /// Apply the closing rule: a project without modules uses namespaces.
    pub fn finish(mut self) -> Self {
        if !self.has_modules {
            self.has_namespaces = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_module_mode_from_field() {
        assert_eq!(ModuleMode::from_field(None), ModuleMode::Unset);
        assert_eq!(ModuleMode::from_field(Some("none")), ModuleMode::None);
        assert_eq!(ModuleMode::from_field(Some("None")), ModuleMode::None);
        assert_eq!(
            ModuleMode::from_field(Some("ES2020")),
            ModuleMode::Named("ES2020".to_string())
        );
    }

    #[test]
    fn test_absorb_named_module() {
        let mut posture = ModulePosture::default();
        posture.absorb(&ModuleMode::Named("esnext".to_string()));
        assert_eq!(
            posture,
            ModulePosture {
                has_modules: true,
                has_namespaces: false
            }
        );
    }

    #[test]
    fn test_absorb_unset() {
        let mut posture = ModulePosture::default();
        posture.absorb(&ModuleMode::Unset);
        assert_eq!(
            posture,
            ModulePosture {
                has_modules: false,
                has_namespaces: true
            }
        );
    }

    #[test]
    fn test_absorb_literal_none_sets_both_flags() {
        let mut posture = ModulePosture::default();
        posture.absorb(&ModuleMode::None);
        assert_eq!(
            posture,
            ModulePosture {
                has_modules: true,
                has_namespaces: true
            }
        );
    }

    #[test]
    fn test_finish_forces_namespaces_without_modules() {
        let posture = ModulePosture::default().finish();
        assert!(!posture.has_modules);
        assert!(posture.has_namespaces);

        let modules_only = ModulePosture {
            has_modules: true,
            has_namespaces: false,
        }
        .finish();
        assert!(!modules_only.has_namespaces);
    }
}
