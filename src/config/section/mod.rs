//! Configuration section definitions.
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[build]`      | Entry points, outputs, target tag, module format |
//! | `[build.main]` | Sandbox-side script (required)                  |
//! | `[build.ui]`   | Iframe-side script, HTML shell, placeholder     |
//! | `[bundler]`    | External bundler command and flags              |
//! | `[watch]`      | Debounce window and extra watch roots           |

pub mod build;
mod bundler;
mod watch;

pub use build::{
    BuildSectionConfig, MainTargetConfig, ModuleFormat, PlaceholderPolicy, UiTargetConfig,
};
pub use bundler::BundlerConfig;
pub use watch::WatchConfig;
