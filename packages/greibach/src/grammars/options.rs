use enumflags2::{bitflags, BitFlags};

use crate::{error::Result, grammars::context_free::Grammar};

/// Transformations applied to a grammar before it is normalized.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarOption {
    /// Reverse every production, for generators that build words from right to left.
    Reversed = 0b1,
}

impl Grammar {
    pub fn apply_options(&self, options: BitFlags<GrammarOption>) -> Grammar {
        if options.contains(GrammarOption::Reversed) {
            return self.reversed();
        }

        self.clone()
    }

    /// Applies `options` and converts the result to Greibach normal form.
    pub fn normalize(&self, options: BitFlags<GrammarOption>) -> Result<Grammar> {
        log::debug!("normalizing grammar with options {:?}", options);

        self.apply_options(options).to_greibach_normal_form()
    }
}
