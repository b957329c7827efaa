//! CSV export of recorded trajectories.

use std::io::{self, Write};

use crate::sim::Trajectory;

pub const CSV_HEADER: &str = "time_s,setpoint,error,command,actuation,state,measurement";

/// Write one header line and one row per sample.
pub fn write_csv<W: Write>(trajectory: &Trajectory, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for s in &trajectory.samples {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            s.time, s.setpoint, s.error, s.command, s.actuation, s.state, s.measurement
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SystemGenerator;
    use crate::presets::UnityLoop;
    use crate::sim::{RunOptions, run};

    #[test]
    fn header_and_rows() {
        let mut sys = UnityLoop.generate_system().unwrap();
        let traj = run(
            &mut sys,
            &RunOptions {
                steps: 2,
                record_every: 1,
            },
        )
        .unwrap();

        let mut buf = Vec::new();
        write_csv(&traj, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + traj.len());
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0,10,0,0,0,0,0");
        assert_eq!(lines[2], "1,10,10,10,10,10,10");
        assert_eq!(lines[3], "2,10,0,0,0,10,10");
    }
}
