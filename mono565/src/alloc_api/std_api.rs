use crate::{alloc_api::PanelFrame, utils::ByteOrder};
use snafu::{ResultExt, Snafu};
use std::io::Write;

#[derive(Debug, Snafu)]
pub enum WriteError {
    #[snafu(display("Failed to write the panel frame"))]
    WriteIo { source: std::io::Error },
}

impl PanelFrame {
    /// Writes the frame to `w`, two bytes per word in byte order `B`.
    pub fn write_to<B: ByteOrder, W: Write>(&self, mut w: W) -> Result<(), WriteError> {
        let mut buf = [0u8; 2];
        for &word in self.words() {
            B::write_u16(&mut buf, word);
            w.write_all(&buf).context(WriteIoSnafu)?;
        }

        w.flush().context(WriteIoSnafu)
    }
}
