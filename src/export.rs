//! CSV export of stage blocks and master schedules.
//!
//! The header row is derived from the record field names. Stages that do
//! not track a field leave the cell empty.

use std::io::Write;

use crate::error::PlanError;
use crate::models::StageBlock;
use crate::planner::MasterSchedule;

/// Writes stage blocks as CSV, one row per block.
pub fn write_blocks_csv<W: Write>(blocks: &[StageBlock], writer: W) -> Result<(), PlanError> {
    let mut csv = csv::Writer::from_writer(writer);
    for block in blocks {
        csv.serialize(block.to_record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Renders stage blocks as a CSV string.
pub fn blocks_to_csv(blocks: &[StageBlock]) -> Result<String, PlanError> {
    let mut buf = Vec::new();
    write_blocks_csv(blocks, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes a master schedule as CSV in chronological order.
pub fn write_master_csv<W: Write>(master: &MasterSchedule, writer: W) -> Result<(), PlanError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in master.chronological() {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Renders a master schedule as a CSV string.
pub fn master_to_csv(master: &MasterSchedule) -> Result<String, PlanError> {
    let mut buf = Vec::new();
    write_master_csv(master, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
