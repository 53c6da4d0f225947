//! Snapshot fixtures shared by the tests of every hiergraph crate.

use crate::snapshot::{Snapshot, SnapshotObject};

/// `top { a { a1 }, b }` with `a1.x` driving `b.y` over binding 7.
///
/// After inference `a` carries a pass-through output `x`.
pub fn cross_level() -> Snapshot {
    Snapshot::new(vec![
        SnapshotObject::module("top", "Top")
            .child(
                SnapshotObject::module("a", "Wrapper").child(
                    SnapshotObject::module("a1", "Producer")
                        .child(SnapshotObject::new("sc_out", "x").bound_to(7).with_alias("sig")),
                ),
            )
            .child(
                SnapshotObject::module("b", "Consumer")
                    .child(SnapshotObject::new("sc_in", "y").bound_to(7)),
            ),
    ])
}

/// A small platform: clock fan-out, an initiator/target socket pair, an
/// unbound port, an empty module and a tooling helper.
pub fn platform() -> Snapshot {
    Snapshot::new(vec![
        SnapshotObject::module("soc", "Soc")
            .child(SnapshotObject::new("sc_clock", "clk").bound_to(100))
            .child(
                SnapshotObject::module("cpu", "Cpu")
                    .child(SnapshotObject::new("sc_in", "clk_i").bound_to(100).with_alias("clk"))
                    .child(SnapshotObject::new("tlm_initiator_socket", "isck").bound_to(200))
                    .child(SnapshotObject::new("sc_port", "isck_port_0"))
                    .child(SnapshotObject::new("sc_thread_process", "run")),
            )
            .child(
                SnapshotObject::module("periph", "Subsystem").child(
                    SnapshotObject::module("mem", "Memory")
                        .child(
                            SnapshotObject::new("sc_in", "clk_i").bound_to(100).with_alias("clk"),
                        )
                        .child(SnapshotObject::new("tlm_target_socket", "tsck").bound_to(200))
                        .child(SnapshotObject::new("sc_export", "tsck_export_0"))
                        .child(SnapshotObject::new("sc_out", "irq")),
                ),
            )
            .child(SnapshotObject::module("spare", "Spare"))
            .child(SnapshotObject::module("$$$hierarchy_dumper$$$", "HierarchyDumper")),
    ])
}
