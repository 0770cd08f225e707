//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and retirement counts, hazard stalls, control-flow flushes,
//! forwarding activity and memory traffic.

use std::time::Instant;

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub stalls_data: u64,
    pub control_flushes: u64,
    pub forwarded_operands: u64,

    pub loads: u64,
    pub stores: u64,
    pub branches_taken: u64,
    pub branches_not_taken: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            stalls_data: 0,
            control_flushes: 0,
            forwarded_operands: 0,
            loads: 0,
            stores: 0,
            branches_taken: 0,
            branches_not_taken: 0,
        }
    }
}

impl SimStats {
    /// Cycles per retired instruction, or 0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let ipc = self.instructions_retired as f64 / cyc as f64;
        let branches = self.branches_taken + self.branches_not_taken;

        println!("\n==========================================================");
        println!("RISC-V PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            (self.stalls_data as f64 / cyc as f64) * 100.0
        );
        println!(
            "  flushes.control        {} ({:.2}%)",
            self.control_flushes,
            (self.control_flushes as f64 / cyc as f64) * 100.0
        );
        println!("  forwarded.operands     {}", self.forwarded_operands);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!("  op.load                {}", self.loads);
        println!("  op.store               {}", self.stores);
        println!("  op.control             {}", branches);
        println!("    taken                {}", self.branches_taken);
        println!("    not_taken            {}", self.branches_not_taken);
        println!("==========================================================");
    }
}
