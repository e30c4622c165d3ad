#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub loglevel: String,
    /// Read commands from this file instead of stdin.
    pub file: Option<String>,
    pub prompt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            loglevel: "info".to_string(),
            file: None,
            prompt: true,
        }
    }
}

impl Config {
    /// Unknown flags are ignored.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Config::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--loglevel" => {
                    if i + 1 < args.len() {
                        config.loglevel = args[i + 1].clone();
                        i += 1;
                    }
                }
                "--file" | "-f" => {
                    if i + 1 < args.len() {
                        config.file = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--no-prompt" => config.prompt = false,
                _ => {}
            }
            i += 1;
        }
        config
    }

    /// The prompt is only shown for interactive stdin sessions.
    pub fn show_prompt(&self) -> bool {
        self.prompt && self.file.is_none()
    }
}
