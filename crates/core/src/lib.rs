pub mod advice;
pub mod domain;
pub mod format;
pub mod wizard;

pub use domain::compensation::{
    compute, compute_checked, CompensationInputs, CompensationResults,
};
pub use domain::units::{Fraction, Percentage};

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_PROGRESS_DIR: &str = ".ratecard";
    const DEFAULT_CURRENCY_SYMBOL: &str = "$";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: Option<String>,
        pub progress_dir: Option<String>,
        pub currency_symbol: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                port: std::env::var("PORT").ok(),
                progress_dir: std::env::var("RATECARD_PROGRESS_DIR").ok(),
                currency_symbol: std::env::var("RATECARD_CURRENCY_SYMBOL").ok(),
            })
        }

        pub fn port(&self) -> anyhow::Result<u16> {
            match self.port.as_deref().map(str::trim) {
                None | Some("") => Ok(DEFAULT_PORT),
                Some(s) => s
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number (got {s:?})")),
            }
        }

        pub fn progress_dir(&self) -> PathBuf {
            self.progress_dir
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_PROGRESS_DIR)
                .into()
        }

        pub fn currency_symbol(&self) -> &str {
            self.currency_symbol
                .as_deref()
                .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
        }
    }

}
