// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::*;
use crate::{error::Error, util::u16_coil_to_bool};

/// The address and value a slave echoes back for a single write.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Echo {
    pub address: Address,
    pub value: Word,
}

impl Echo {
    /// Interpret the echoed value as a coil state.
    pub const fn coil(&self) -> Result<bool, Error> {
        u16_coil_to_bool(self.value)
    }
}
