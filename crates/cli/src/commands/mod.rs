pub mod auth;
pub mod cart;
pub mod config;
pub mod doctor;
pub mod find;
pub mod wishlist;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(command: &str, message: impl Into<String>, exit_code: u8) -> Self {
        Self { exit_code, output: format!("{command}: {}", message.into()) }
    }
}
