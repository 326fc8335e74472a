//! Host-loop metric names.
//!
//! Counters are recorded through the `metrics` facade; `kitd` does not
//! install an exporter, so they cost nothing unless a recorder is set.

use metrics::{describe_counter, Unit};

/// Messages dispatched, labelled by `command`.
pub const MESSAGES: &str = "kit.host.messages";
/// Dispatched messages whose handler returned a non-success status.
/// Labelled by `command` and `status`.
pub const MESSAGE_FAILURES: &str = "kit.host.message_failures";
/// Messages rejected before dispatch.
pub const PARSE_ERRORS: &str = "kit.host.parse_errors";
/// Buffers dropped for exceeding the message size limit.
pub const OVERFLOWS: &str = "kit.host.overflows";
/// Host connections accepted.
pub const CONNECTIONS: &str = "kit.host.connections";

/// Register descriptions for every host-loop metric.
pub fn describe_metrics() {
    describe_counter!(MESSAGES, Unit::Count, "Kit Protocol messages dispatched");
    describe_counter!(
        MESSAGE_FAILURES,
        Unit::Count,
        "Dispatched messages answered with a failure status"
    );
    describe_counter!(PARSE_ERRORS, Unit::Count, "Messages rejected by the parser");
    describe_counter!(OVERFLOWS, Unit::Count, "Oversized host buffers discarded");
    describe_counter!(CONNECTIONS, Unit::Count, "Host connections accepted");
}
