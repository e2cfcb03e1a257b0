//! Memory port contracts.
//!
//! Both ports use the same three-signal handshake, evaluated once per cycle
//! in the combinational phase and clocked once at the tick boundary:
//! 1. **valid:** the core presents a request (`Some(request)`).
//! 2. **ready:** the port could accept a new request this cycle.
//! 3. **good:** the response carries completed data for `addr` this cycle.
//!
//! A port with latency answers `good` some cycles after accepting; the core
//! keeps presenting the same request until then and turns the wait into
//! pipeline stalls. `fault` is only meaningful together with `good`.

use crate::core::units::lsu::MemWidth;

/// An instruction fetch request for the 64-bit fetch word at `addr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Fetch-word aligned address.
    pub addr: u64,
}

/// Instruction port response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchResponse {
    /// The port can accept a request this cycle.
    pub ready: bool,
    /// `word` holds completed data for `addr`.
    pub good: bool,
    /// The completed access faulted; `word` is meaningless.
    pub fault: bool,
    /// Address the completed data belongs to.
    pub addr: u64,
    /// Two packed instructions: lower address in bits 31:0.
    pub word: u64,
}

/// Direction of a data access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataOp {
    /// Load.
    #[default]
    Read,
    /// Store.
    Write,
}

/// A data load or store request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataRequest {
    /// Byte address.
    pub addr: u64,
    /// Load or store.
    pub op: DataOp,
    /// Access width.
    pub width: MemWidth,
    /// Store data in the low `width` bytes; ignored for loads.
    pub data: u64,
}

/// Data port response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataResponse {
    /// The port can accept a request this cycle.
    pub ready: bool,
    /// The access to `addr` completed this cycle.
    pub good: bool,
    /// The completed access faulted.
    pub fault: bool,
    /// Address of the completed access.
    pub addr: u64,
    /// Raw loaded bytes, zero-extended; 0 for stores.
    pub data: u64,
}

/// Instruction memory port.
pub trait InstructionPort {
    /// Combinational evaluation for the current cycle.
    fn evaluate(&mut self, req: Option<FetchRequest>) -> FetchResponse;

    /// Advances the port's internal state at the tick boundary.
    fn clock(&mut self);
}

/// Data memory port.
pub trait DataPort {
    /// Combinational evaluation for the current cycle.
    ///
    /// Stores are committed at the following `clock`, never during evaluation.
    fn evaluate(&mut self, req: Option<DataRequest>) -> DataResponse;

    /// Advances the port's internal state at the tick boundary.
    fn clock(&mut self);
}
