//! DRAM timing models.
//!
//! Each entry describes one interface standard: device geometry and the core
//! timing parameters (all in picoseconds). The catalog's default is
//! `DDR3_1600_8x8`.

use crate::common::Param;
use crate::soc::catalog::{Catalog, CatalogEntry};

/// Parameters every timing model must carry once bound to a controller.
pub const REQUIRED_PARAMS: &[&str] = &[
    "range",
    "device_size",
    "device_bus_width",
    "burst_length",
    "tCK",
    "tBURST",
    "tRCD",
    "tCL",
    "tRP",
];

/// Geometry and timing of one DRAM interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DramTiming {
    /// Capacity of a single device, e.g. `"512MiB"`.
    pub device_size: &'static str,
    /// Data bus width of a single device, in bits.
    pub device_bus_width: u32,
    /// Beats per burst.
    pub burst_length: u32,
    /// Devices ganged into one rank.
    pub devices_per_rank: u32,
    /// Ranks per channel.
    pub ranks_per_channel: u32,
    /// Banks per rank.
    pub banks_per_rank: u32,
    /// Row buffer size per device, in bytes.
    pub device_rowbuffer_size: u32,
    /// Clock period.
    pub t_ck: u64,
    /// Burst duration.
    pub t_burst: u64,
    /// Activate to read/write.
    pub t_rcd: u64,
    /// CAS latency.
    pub t_cl: u64,
    /// Precharge.
    pub t_rp: u64,
    /// Activate to precharge.
    pub t_ras: u64,
    /// Refresh cycle time.
    pub t_rfc: u64,
    /// Refresh interval.
    pub t_refi: u64,
}

impl DramTiming {
    /// Bytes moved by one burst across the whole rank.
    pub const fn burst_bytes(&self) -> u64 {
        (self.device_bus_width as u64 * self.burst_length as u64 * self.devices_per_rank as u64) / 8
    }

    /// Peak channel bandwidth in bytes per second.
    ///
    /// # Returns
    ///
    /// `burst_bytes / tBURST`, e.g. 12.8 GB/s for DDR3-1600 x64.
    pub const fn peak_bandwidth(&self) -> u64 {
        self.burst_bytes() * 1_000_000_000_000 / self.t_burst
    }

    /// Timing and geometry as `(name, value)` component parameters.
    pub(crate) fn params(&self) -> [(&'static str, Param); 15] {
        [
            ("device_size", self.device_size.into()),
            ("device_bus_width", self.device_bus_width.into()),
            ("burst_length", self.burst_length.into()),
            ("devices_per_rank", self.devices_per_rank.into()),
            ("ranks_per_channel", self.ranks_per_channel.into()),
            ("banks_per_rank", self.banks_per_rank.into()),
            ("device_rowbuffer_size", self.device_rowbuffer_size.into()),
            ("tCK", self.t_ck.into()),
            ("tBURST", self.t_burst.into()),
            ("tRCD", self.t_rcd.into()),
            ("tCL", self.t_cl.into()),
            ("tRP", self.t_rp.into()),
            ("tRAS", self.t_ras.into()),
            ("tRFC", self.t_rfc.into()),
            ("tREFI", self.t_refi.into()),
        ]
    }
}

const DDR3_1600_8X8: DramTiming = DramTiming {
    device_size: "512MiB",
    device_bus_width: 8,
    burst_length: 8,
    devices_per_rank: 8,
    ranks_per_channel: 2,
    banks_per_rank: 8,
    device_rowbuffer_size: 1024,
    t_ck: 1_250,
    t_burst: 5_000,
    t_rcd: 13_750,
    t_cl: 13_750,
    t_rp: 13_750,
    t_ras: 35_000,
    t_rfc: 260_000,
    t_refi: 7_800_000,
};

const DRAM_ENTRIES: &[CatalogEntry<DramTiming>] = &[
    CatalogEntry {
        name: "DDR3_1600_8x8",
        variant: DDR3_1600_8X8,
        required_params: REQUIRED_PARAMS,
    },
    CatalogEntry {
        name: "DDR3_2133_8x8",
        variant: DramTiming {
            t_ck: 938,
            t_burst: 3_752,
            t_rcd: 13_090,
            t_cl: 13_090,
            t_rp: 13_090,
            t_ras: 33_000,
            ..DDR3_1600_8X8
        },
        required_params: REQUIRED_PARAMS,
    },
    CatalogEntry {
        name: "LPDDR2_S4_1066_1x32",
        variant: DramTiming {
            device_size: "512MiB",
            device_bus_width: 32,
            burst_length: 8,
            devices_per_rank: 1,
            ranks_per_channel: 1,
            banks_per_rank: 8,
            device_rowbuffer_size: 1024,
            t_ck: 1_876,
            t_burst: 7_500,
            t_rcd: 15_000,
            t_cl: 15_000,
            t_rp: 15_000,
            t_ras: 42_000,
            t_rfc: 130_000,
            t_refi: 3_900_000,
        },
        required_params: REQUIRED_PARAMS,
    },
    CatalogEntry {
        name: "HBM_1000_4H_1x64",
        variant: DramTiming {
            device_size: "256MiB",
            device_bus_width: 64,
            burst_length: 4,
            devices_per_rank: 1,
            ranks_per_channel: 2,
            banks_per_rank: 16,
            device_rowbuffer_size: 1024,
            t_ck: 2_000,
            t_burst: 4_000,
            t_rcd: 14_000,
            t_cl: 14_000,
            t_rp: 14_000,
            t_ras: 33_000,
            t_rfc: 160_000,
            t_refi: 3_900_000,
        },
        required_params: REQUIRED_PARAMS,
    },
];

/// Registered DRAM timing models, selected by the `memory` override.
pub static DRAM_CATALOG: Catalog<DramTiming> = Catalog::new("memory", DRAM_ENTRIES, 0);
