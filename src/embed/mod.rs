//! Embedded static resources for figpack.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `scaffold` - Project files written by `figpack init`
//!
//! # Usage
//!
//! ```ignore
//! use embed::scaffold::{MAIN_TS, PluginVars};
//!
//! let source = MAIN_TS.render(&PluginVars { name: "My Plugin" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod scaffold {
    use super::{Template, TemplateVars};

    /// Variables shared by the source templates.
    pub struct PluginVars<'a> {
        pub name: &'a str,
    }

    impl TemplateVars for PluginVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__NAME__", self.name)
        }
    }

    /// Variables for the HTML shell.
    pub struct ShellVars<'a> {
        pub name: &'a str,
        pub placeholder: &'a str,
    }

    impl TemplateVars for ShellVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__NAME__", self.name)
                .replace("__PLACEHOLDER__", self.placeholder)
        }
    }

    /// Variables for figpack.toml.
    pub struct ConfigVars<'a> {
        pub version: &'a str,
    }

    impl TemplateVars for ConfigVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__VERSION__", self.version)
        }
    }

    /// Sandbox script that opens the UI.
    pub const MAIN_TS: Template<PluginVars<'static>> =
        Template::new(include_str!("scaffold/main.ts"));

    /// Sandbox script for plugins without a UI.
    pub const MAIN_HEADLESS_TS: Template<PluginVars<'static>> =
        Template::new(include_str!("scaffold/main_headless.ts"));

    /// Iframe script.
    pub const UI_TS: Template<PluginVars<'static>> = Template::new(include_str!("scaffold/ui.ts"));

    /// HTML shell holding the placeholder.
    pub const UI_HTML: Template<ShellVars<'static>> =
        Template::new(include_str!("scaffold/ui.html"));

    /// Commented default configuration.
    pub const CONFIG_TOML: Template<ConfigVars<'static>> =
        Template::new(include_str!("scaffold/figpack.toml"));
}
