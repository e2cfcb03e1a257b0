//! Load/Store helpers.
//!
//! Width selection from `funct3`, store-data masking and load extension. The
//! data port itself moves raw little-endian bytes; this module gives them
//! their architectural meaning.

use crate::isa::funct::{load, store};

/// Access width of a load or store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit byte access.
    Byte,
    /// 16-bit halfword access.
    Half,
    /// 32-bit word access.
    Word,
    /// 64-bit doubleword access.
    #[default]
    Double,
}

impl MemWidth {
    /// Number of bytes moved.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Mask covering the accessed bytes.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Double => u64::MAX,
            w => (1 << (w.bytes() * 8)) - 1,
        }
    }
}

/// Load/store unit helpers.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Width of a load, or `None` for the reserved `funct3`.
    pub const fn load_width(funct3: u32) -> Option<MemWidth> {
        match funct3 {
            load::LB | load::LBU => Some(MemWidth::Byte),
            load::LH | load::LHU => Some(MemWidth::Half),
            load::LW | load::LWU => Some(MemWidth::Word),
            load::LD => Some(MemWidth::Double),
            _ => None,
        }
    }

    /// Width of a store, or `None` for a reserved `funct3`.
    pub const fn store_width(funct3: u32) -> Option<MemWidth> {
        match funct3 {
            store::SB => Some(MemWidth::Byte),
            store::SH => Some(MemWidth::Half),
            store::SW => Some(MemWidth::Word),
            store::SD => Some(MemWidth::Double),
            _ => None,
        }
    }

    /// Sign- or zero-extends raw loaded bytes according to the load's `funct3`.
    pub const fn extend_load(funct3: u32, raw: u64) -> u64 {
        match funct3 {
            load::LB => raw as i8 as i64 as u64,
            load::LH => raw as i16 as i64 as u64,
            load::LW => raw as i32 as i64 as u64,
            load::LBU => raw & 0xFF,
            load::LHU => raw & 0xFFFF,
            load::LWU => raw & 0xFFFF_FFFF,
            _ => raw,
        }
    }
}
