//! Major opcodes (bits 0-6) recognised by the core.

/// Load Upper Immediate.
pub const OP_LUI: u32 = 0b011_0111;
/// Add Upper Immediate to PC.
pub const OP_AUIPC: u32 = 0b001_0111;
/// Jump And Link.
pub const OP_JAL: u32 = 0b110_1111;
/// Jump And Link Register.
pub const OP_JALR: u32 = 0b110_0111;
/// Conditional branches.
pub const OP_BRANCH: u32 = 0b110_0011;
/// Integer loads.
pub const OP_LOAD: u32 = 0b000_0011;
/// Integer stores.
pub const OP_STORE: u32 = 0b010_0011;
/// Register-immediate ALU operations.
pub const OP_IMM: u32 = 0b001_0011;
/// Register-immediate ALU operations on 32-bit words (`ADDIW`, `SLLIW`, ...).
pub const OP_IMM_32: u32 = 0b001_1011;
/// Register-register ALU and M-extension operations.
pub const OP_REG: u32 = 0b011_0011;
/// Register-register operations on 32-bit words (`ADDW`, `MULW`, ...).
pub const OP_REG_32: u32 = 0b011_1011;
/// `FENCE` and friends.
pub const OP_MISC_MEM: u32 = 0b000_1111;
/// `ECALL` / `EBREAK`.
pub const OP_SYSTEM: u32 = 0b111_0011;

/// Full encoding of `ECALL`.
pub const ECALL: u32 = 0x0000_0073;
/// Full encoding of `EBREAK`.
pub const EBREAK: u32 = 0x0010_0073;
