/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains both inbound ports (driving ports - the run entry point)
/// and outbound ports (driven ports - inventory, metrics, store, clock, console).
pub mod inbound;
pub mod outbound;
