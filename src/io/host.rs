use std::io::Write;

/// Abstract the host environment to enable testing
pub trait Host {
    // where to send normal output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send diagnostics and status lines (e.g., stderr)
    fn error(&mut self) -> impl Write;
}

/// Process stdout/stderr
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn output(&mut self) -> impl Write {
        std::io::stdout()
    }

    fn error(&mut self) -> impl Write {
        std::io::stderr()
    }
}

/// Host that captures output to in-memory buffers
#[derive(Debug, Default)]
pub struct BufferHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

impl BufferHost {
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

impl Host for BufferHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }
}
