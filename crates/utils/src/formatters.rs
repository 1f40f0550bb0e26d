// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use core::fmt;

/// Hex formatter for byte payloads; long payloads are abridged so
/// ciphertext blobs don't flood logs.
pub fn hexf(data: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    const HEAD: usize = 12;
    if data.len() <= 2 * HEAD {
        write!(f, "0x")?;
        for b in data {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    } else {
        write!(f, "<bytes({}):0x", data.len())?;
        for b in &data[..HEAD] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "..")?;
        for b in &data[data.len() - HEAD..] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ">")
    }
}
