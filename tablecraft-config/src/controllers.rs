use serde::Deserialize;

/// Controller generator settings
#[derive(Debug, Clone, Deserialize)]
pub struct ControllersConfig {
    /// Directory controllers are written to, relative to the output base
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    /// PHP namespace of the generated controllers
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ControllersConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            namespace: default_namespace(),
        }
    }
}

fn default_output_directory() -> String {
    "app/Http/Controllers".to_string()
}

fn default_namespace() -> String {
    "App\\Http\\Controllers".to_string()
}
