use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Filter directive covering this workspace's crates only, so
    /// reqwest and hyper stay quiet unless `RUST_LOG` asks for them.
    pub fn directive(self) -> String {
        let level = self.as_str();
        format!("prompttree_cli={level},prompttree_runtime={level},prompttree_engine={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_names_workspace_crates() {
        assert_eq!(
            LogLevel::Debug.directive(),
            "prompttree_cli=debug,prompttree_runtime=debug,prompttree_engine=debug"
        );
    }
}
