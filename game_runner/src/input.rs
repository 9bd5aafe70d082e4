use std::io::{self, BufRead, Read};

/// Line-at-a-time view of stdin that does not hold the stdin lock between reads,
/// so the menu and any number of human players can share the terminal.
#[derive(Default)]
pub struct StdinLines {
    buf: Vec<u8>,
    pos: usize,
}

impl StdinLines {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Read for StdinLines {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);

        Ok(n)
    }
}

impl BufRead for StdinLines {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.buf.len() {
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;

            self.buf = line.into_bytes();
            self.pos = 0;
        }

        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

/// Reads one trimmed line from stdin, or None at the end of input.
pub fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();

    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_owned()))
}
