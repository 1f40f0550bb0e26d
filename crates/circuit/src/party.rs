// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};

/// The two participants in the interactive phase.
///
/// The roles are asymmetric and the asymmetry is part of the protocol,
/// not a deployment choice: the server holds the model and generates
/// the output mask, the client holds the input and is the only party
/// the masked result is revealed to. Code that depends on a capability
/// asks for it by name instead of comparing variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    Server,
    Client,
}

impl Party {
    /// Whether this party generates the fresh output mask.
    pub fn supplies_mask(self) -> bool {
        matches!(self, Party::Server)
    }

    /// Whether the masked circuit output is revealed to this party.
    pub fn receives_output(self) -> bool {
        matches!(self, Party::Client)
    }

    pub fn other(self) -> Party {
        match self {
            Party::Server => Party::Client,
            Party::Client => Party::Server,
        }
    }
}
