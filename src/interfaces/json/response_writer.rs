use crate::domain::response::Response;
use crate::error::Result;
use std::io::Write;

/// Writes the callback response body.
pub struct ResponseWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_response(&mut self, response: &Response) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, response)?;
        } else {
            serde_json::to_writer(&mut self.writer, response)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_compact_output() {
        let mut buffer = Vec::new();
        ResponseWriter::new(&mut buffer)
            .write_response(&Response::failure("address invalid"))
            .unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"ok\":false,\"details\":\"address invalid\"}\n"
        );
    }

    #[test]
    fn test_writer_pretty_output() {
        let mut buffer = Vec::new();
        ResponseWriter::new(&mut buffer)
            .pretty(true)
            .write_response(&Response::success(vec![]))
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\n  \"ok\": true"));
        assert!(text.contains("\"shipping_results\": []"));
    }
}
