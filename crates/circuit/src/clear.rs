// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use zeroize::Zeroizing;

use crate::engine::{OutputId, SimdEngine};
use crate::errors::CircuitError;
use crate::party::Party;

/// Reference engine that evaluates the gate list in the clear.
///
/// Both parties are simulated in one process, so every input value is
/// available locally. The engine still enforces the protocol's
/// observable boundary (single atomic evaluation, per-party output
/// release, no gate appended after a run), so protocol code and tests
/// exercise the same contract a garbled-circuit engine enforces
/// cryptographically. It provides no protection against the host
/// process itself and must never stand in for a real engine across a
/// trust boundary.
///
/// Lane buffers hold reconstructed secrets during evaluation; they are
/// zeroized when dropped.
#[derive(Default)]
pub struct ClearEngine {
    gates: Vec<Gate>,
    /// (bit_width, lanes) per gate, fixed at construction.
    shapes: Vec<(u32, usize)>,
    outputs: Vec<OutputSlot>,
    evaluated: bool,
}

/// Wire handle: index into the owning engine's gate list plus the
/// SIMD shape used for compatibility checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearWire {
    index: usize,
    bit_width: u32,
    lanes: usize,
}

enum Gate {
    Input {
        #[allow(dead_code)]
        owner: Party,
        values: Zeroizing<Vec<u64>>,
    },
    Constant {
        lanes: usize,
        value: u64,
    },
    Add(usize, usize),
    Sub(usize, usize),
    Gt(usize, usize),
    Mux {
        on_true: usize,
        on_false: usize,
        sel: usize,
    },
}

struct OutputSlot {
    wire: usize,
    party: Party,
    values: Option<Zeroizing<Vec<u64>>>,
}

fn lane_mask(bit_width: u32) -> u64 {
    if bit_width >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_width) - 1
    }
}

impl ClearEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> Result<(), CircuitError> {
        if self.evaluated {
            return Err(CircuitError::AlreadyEvaluated);
        }
        Ok(())
    }

    fn check_width(&self, bit_width: u32) -> Result<(), CircuitError> {
        if bit_width == 0 || bit_width > 64 {
            return Err(CircuitError::UnsupportedBitWidth { bit_width });
        }
        Ok(())
    }

    fn check_pair(&self, a: &ClearWire, b: &ClearWire) -> Result<(), CircuitError> {
        if a.index >= self.gates.len() || b.index >= self.gates.len() {
            return Err(CircuitError::ForeignWire);
        }
        if a.lanes != b.lanes {
            return Err(CircuitError::LaneMismatch {
                left: a.lanes,
                right: b.lanes,
            });
        }
        if a.bit_width != b.bit_width {
            return Err(CircuitError::WidthMismatch {
                left: a.bit_width,
                right: b.bit_width,
            });
        }
        Ok(())
    }

    fn push(&mut self, gate: Gate, bit_width: u32, lanes: usize) -> ClearWire {
        let index = self.gates.len();
        self.gates.push(gate);
        self.shapes.push((bit_width, lanes));
        ClearWire {
            index,
            bit_width,
            lanes,
        }
    }
}

impl SimdEngine for ClearEngine {
    type Wire = ClearWire;

    fn simd_input(
        &mut self,
        owner: Party,
        bit_width: u32,
        values: &[u64],
    ) -> Result<ClearWire, CircuitError> {
        self.check_open()?;
        self.check_width(bit_width)?;
        let mask = lane_mask(bit_width);
        let lanes = values.len();
        let values = Zeroizing::new(values.iter().map(|&v| v & mask).collect());
        Ok(self.push(Gate::Input { owner, values }, bit_width, lanes))
    }

    fn simd_constant(
        &mut self,
        bit_width: u32,
        lanes: usize,
        value: u64,
    ) -> Result<ClearWire, CircuitError> {
        self.check_open()?;
        self.check_width(bit_width)?;
        let value = value & lane_mask(bit_width);
        Ok(self.push(Gate::Constant { lanes, value }, bit_width, lanes))
    }

    fn add(&mut self, a: &ClearWire, b: &ClearWire) -> Result<ClearWire, CircuitError> {
        self.check_open()?;
        self.check_pair(a, b)?;
        Ok(self.push(Gate::Add(a.index, b.index), a.bit_width, a.lanes))
    }

    fn sub(&mut self, a: &ClearWire, b: &ClearWire) -> Result<ClearWire, CircuitError> {
        self.check_open()?;
        self.check_pair(a, b)?;
        Ok(self.push(Gate::Sub(a.index, b.index), a.bit_width, a.lanes))
    }

    fn gt(&mut self, a: &ClearWire, b: &ClearWire) -> Result<ClearWire, CircuitError> {
        self.check_open()?;
        self.check_pair(a, b)?;
        Ok(self.push(Gate::Gt(a.index, b.index), a.bit_width, a.lanes))
    }

    fn mux(
        &mut self,
        on_true: &ClearWire,
        on_false: &ClearWire,
        sel: &ClearWire,
    ) -> Result<ClearWire, CircuitError> {
        self.check_open()?;
        self.check_pair(on_true, on_false)?;
        self.check_pair(on_true, sel)?;
        Ok(self.push(
            Gate::Mux {
                on_true: on_true.index,
                on_false: on_false.index,
                sel: sel.index,
            },
            on_true.bit_width,
            on_true.lanes,
        ))
    }

    fn reveal(&mut self, wire: &ClearWire, to: Party) -> Result<OutputId, CircuitError> {
        self.check_open()?;
        if wire.index >= self.gates.len() {
            return Err(CircuitError::ForeignWire);
        }
        let id = OutputId(self.outputs.len());
        self.outputs.push(OutputSlot {
            wire: wire.index,
            party: to,
            values: None,
        });
        Ok(id)
    }

    fn run(&mut self) -> Result<(), CircuitError> {
        self.check_open()?;
        // Evaluation is one atomic pass: whatever happens, the circuit
        // is closed afterwards and can never be resumed.
        self.evaluated = true;

        let mut lanes: Vec<Zeroizing<Vec<u64>>> = Vec::with_capacity(self.gates.len());
        for (gate, &(bit_width, _)) in self.gates.iter().zip(&self.shapes) {
            let mask = lane_mask(bit_width);
            let out: Zeroizing<Vec<u64>> = match gate {
                Gate::Input { values, .. } => values.clone(),
                Gate::Constant { lanes: n, value } => Zeroizing::new(vec![*value; *n]),
                Gate::Add(a, b) => Zeroizing::new(
                    lanes[*a]
                        .iter()
                        .zip(lanes[*b].iter())
                        .map(|(x, y)| x.wrapping_add(*y) & mask)
                        .collect(),
                ),
                Gate::Sub(a, b) => Zeroizing::new(
                    lanes[*a]
                        .iter()
                        .zip(lanes[*b].iter())
                        .map(|(x, y)| x.wrapping_sub(*y) & mask)
                        .collect(),
                ),
                Gate::Gt(a, b) => Zeroizing::new(
                    lanes[*a]
                        .iter()
                        .zip(lanes[*b].iter())
                        .map(|(x, y)| u64::from(x > y))
                        .collect(),
                ),
                Gate::Mux {
                    on_true,
                    on_false,
                    sel,
                } => Zeroizing::new(
                    lanes[*on_true]
                        .iter()
                        .zip(lanes[*on_false].iter())
                        .zip(lanes[*sel].iter())
                        .map(|((t, f), s)| {
                            // Arithmetic select; both arms were computed.
                            let keep = 0u64.wrapping_sub(u64::from(*s != 0));
                            (t & keep) | (f & !keep)
                        })
                        .collect(),
                ),
            };
            lanes.push(out);
        }

        for slot in &mut self.outputs {
            slot.values = Some(lanes[slot.wire].clone());
        }
        // Intermediate lane buffers are zeroized on drop here.
        Ok(())
    }

    fn take_output(&mut self, id: OutputId, as_party: Party) -> Result<Vec<u64>, CircuitError> {
        if !self.evaluated {
            return Err(CircuitError::NotEvaluated);
        }
        let slot = self.outputs.get_mut(id.0).ok_or(CircuitError::ForeignWire)?;
        if slot.party != as_party {
            return Err(CircuitError::NotRevealedTo { party: as_party });
        }
        let values = slot.values.take().ok_or(CircuitError::OutputConsumed)?;
        Ok(values.to_vec())
    }
}
