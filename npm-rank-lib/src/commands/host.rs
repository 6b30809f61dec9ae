use std::io::Write;

/// The process environment a command runs in.
///
/// Commands write reports to `output`, diagnostics to `error`, and report failure through
/// `exit`, which lets tests run commands without touching the real process.
pub trait Host: Send + Sync {
    /// Destination for reports (stdout for the real binary).
    fn output(&mut self) -> impl Write;

    /// Destination for diagnostics (stderr for the real binary).
    fn error(&mut self) -> impl Write;

    /// Terminate with `code`. Test hosts record the code and return.
    fn exit(&mut self, code: i32);
}

/// Host that captures output in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
