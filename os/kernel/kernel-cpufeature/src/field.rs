//! Bitfield extraction from raw identification register values.

/// How the raw bits of a field are widened before comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sign {
    /// Zero-extend.
    Unsigned,
    /// Sign-extend from the field's top bit.
    Signed,
}

/// Location and interpretation of a feature field inside a 64-bit register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeatureField {
    pub shift: u8,
    pub width: u8,
    pub sign: Sign,
}

impl FeatureField {
    /// Width of the standard Arm ID register fields.
    pub const ID_FIELD_WIDTH: u8 = 4;

    #[must_use]
    pub const fn new(shift: u8, width: u8, sign: Sign) -> Self {
        Self { shift, width, sign }
    }

    /// A standard 4-bit, signed ID register field.
    ///
    /// ID fields are signed unless the architecture says otherwise: `0b1111`
    /// reads as -1 and means "not implemented", which then compares below
    /// every non-negative threshold.
    #[must_use]
    pub const fn id_reg(shift: u8) -> Self {
        Self::new(shift, Self::ID_FIELD_WIDTH, Sign::Signed)
    }

    /// A standard 4-bit ID register field that is documented as unsigned.
    #[must_use]
    pub const fn id_reg_unsigned(shift: u8) -> Self {
        Self::new(shift, Self::ID_FIELD_WIDTH, Sign::Unsigned)
    }

    /// Whether the field fits into a 64-bit register.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && (self.shift as u32) + (self.width as u32) <= u64::BITS
    }

    /// Extract the field from `reg` and widen it according to [`Sign`].
    ///
    /// The field must be [valid](Self::is_valid); tables check this when they
    /// are built.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn extract(&self, reg: u64) -> i64 {
        debug_assert!(self.is_valid());
        let width = self.width as u32;
        let shift = self.shift as u32;

        // move the field's top bit to bit 63, then shift it back down
        let top = reg << (u64::BITS - width - shift);
        match self.sign {
            Sign::Signed => (top as i64) >> (u64::BITS - width),
            Sign::Unsigned => (top >> (u64::BITS - width)) as i64,
        }
    }
}
