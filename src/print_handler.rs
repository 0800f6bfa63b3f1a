//! Where `print` statements go.
//!
//! Stdout by default; a buffer when the output has to be captured
//! (tests, embedding).

use std::cell::RefCell;

#[derive(Debug, Default)]
pub enum PrintHandler {
    #[default]
    Stdout,
    Buffer(RefCell<String>),
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(RefCell::new(String::new()))
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(msg);
                buffer.push('\n');
            }
        }
    }

    /// Captured output. Always empty for stdout.
    pub fn get_output(&self) -> String {
        match self {
            PrintHandler::Stdout => String::new(),
            PrintHandler::Buffer(buffer) => buffer.borrow().clone(),
        }
    }
}
