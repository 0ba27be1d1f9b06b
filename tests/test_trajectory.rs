use irc2xyz::parser::parse_irc_content;
use irc2xyz::trajectory::{assemble_trajectories, write_trajectory};
use std::fs;
use tempfile::TempDir;

/// Minimal reader for the produced XYZ text: returns per-frame
/// (atom count, comment line, atom lines).
fn read_frames(text: &str) -> Vec<(usize, String, Vec<String>)> {
    let mut frames = Vec::new();
    let mut lines = text.lines();
    while let Some(count_line) = lines.next() {
        let count: usize = count_line.parse().unwrap();
        let comment = lines.next().unwrap().to_string();
        let atoms: Vec<String> = (0..count).map(|_| lines.next().unwrap().to_string()).collect();
        frames.push((count, comment, atoms));
    }
    frames
}

#[test]
fn test_end_to_end_h2_scenario() {
    // TS plus one forward step, no backward section.
    let content = "\
INITIAL STRUCTURE
H    0.000000   0.000000   0.000000
H    0.000000   0.000000   0.740000
ENERGY    =   -1.000000

IRC FOLLOWING (FORWARD)
# STEP 1
H    0.010000   0.000000   0.000000
H    0.010000   0.000000   0.740000
ENERGY    =   -1.000100
EQ EXIST WITHIN STEPSIZE
";
    let log = parse_irc_content(content).unwrap();
    let (forward, backward) = assemble_trajectories(&log);

    let dir = TempDir::new().unwrap();
    let fwd_path = dir.path().join("irc_forward.xyz");
    let bwd_path = dir.path().join("irc_backward.xyz");
    write_trajectory(&forward, &fwd_path).unwrap();
    write_trajectory(&backward, &bwd_path).unwrap();

    let fwd_frames = read_frames(&fs::read_to_string(&fwd_path).unwrap());
    assert_eq!(fwd_frames.len(), 2);
    assert_eq!(fwd_frames[0].0, 2);
    assert_eq!(fwd_frames[0].1, "Energy=-1.000000 Label=TS");
    assert_eq!(fwd_frames[1].1, "Energy=-1.000100 Label=FWD");
    assert_eq!(fwd_frames[1].2[0], "H 0.010000 0.000000 0.000000");

    let bwd_frames = read_frames(&fs::read_to_string(&bwd_path).unwrap());
    assert_eq!(bwd_frames.len(), 1);
    assert_eq!(bwd_frames[0].1, "Energy=-1.000000 Label=TS");
}

#[test]
fn test_round_trip_preserves_frames() {
    let content = "\
INITIAL STRUCTURE
O    0.000000   0.000000   0.117300
H    0.000000   0.757200  -0.469200
H    0.000000  -0.757200  -0.469200
ENERGY    =   -76.241234

IRC FOLLOWING (FORWARD)
# STEP 1
O    0.001000   0.000000   0.118300
H    0.001000   0.758200  -0.468200
H    0.001000  -0.756200  -0.470200
ENERGY    =   -76.241500
EQ EXIST WITHIN STEPSIZE
";
    let log = parse_irc_content(content).unwrap();
    let (forward, _) = assemble_trajectories(&log);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.xyz");
    write_trajectory(&forward, &path).unwrap();

    let frames = read_frames(&fs::read_to_string(&path).unwrap());
    assert_eq!(frames.len(), forward.len());
    for (written, frame) in frames.iter().zip(forward.iter()) {
        assert_eq!(written.0, frame.geometry.num_atoms);
        assert!(written.1.contains(&format!("Label={}", frame.label)));
        for (i, atom_line) in written.2.iter().enumerate() {
            let tokens: Vec<&str> = atom_line.split_whitespace().collect();
            assert_eq!(tokens[0], frame.geometry.elements[i]);
            let [x, y, z] = frame.geometry.get_atom_coords(i);
            assert!((tokens[1].parse::<f64>().unwrap() - x).abs() < 5e-7);
            assert!((tokens[2].parse::<f64>().unwrap() - y).abs() < 5e-7);
            assert!((tokens[3].parse::<f64>().unwrap() - z).abs() < 5e-7);
        }
    }
}

#[test]
fn test_backward_file_reverses_log_order() {
    let content = "\
INITIAL STRUCTURE
H    0.000000   0.000000   0.000000
ENERGY    =   -1.000000

IRC FOLLOWING (BACKWARD)
# STEP 1
H   -0.010000   0.000000   0.000000
ENERGY    =   -1.000300
# STEP 2
H   -0.020000   0.000000   0.000000
ENERGY    =   -1.000400
Energy profile along IRC
";
    let log = parse_irc_content(content).unwrap();
    let (_, backward) = assemble_trajectories(&log);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("irc_backward.xyz");
    write_trajectory(&backward, &path).unwrap();

    let frames = read_frames(&fs::read_to_string(&path).unwrap());
    assert_eq!(frames.len(), 3);
    // The last step in the log comes out first after the TS frame.
    assert_eq!(frames[1].1, "Energy=-1.000400 Label=BWD");
    assert_eq!(frames[2].1, "Energy=-1.000300 Label=BWD");
    assert_eq!(frames[1].2[0], "H -0.020000 0.000000 0.000000");
}

#[test]
fn test_both_outputs_begin_with_identical_ts_frame() {
    let content = "\
INITIAL STRUCTURE
C    0.000000   0.000000   0.000000
H    1.089000   0.000000   0.000000
ENERGY    =   -40.518400

IRC FOLLOWING (FORWARD)
# STEP 1
C    0.010000   0.000000   0.000000
H    1.099000   0.000000   0.000000
ENERGY    =   -40.518100
EQ EXIST WITHIN STEPSIZE

IRC FOLLOWING (BACKWARD)
# STEP 1
C   -0.010000   0.000000   0.000000
H    1.079000   0.000000   0.000000
ENERGY    =   -40.518200
Energy profile along IRC
";
    let log = parse_irc_content(content).unwrap();
    let (forward, backward) = assemble_trajectories(&log);

    let dir = TempDir::new().unwrap();
    let fwd_path = dir.path().join("f.xyz");
    let bwd_path = dir.path().join("b.xyz");
    write_trajectory(&forward, &fwd_path).unwrap();
    write_trajectory(&backward, &bwd_path).unwrap();

    let fwd_frames = read_frames(&fs::read_to_string(&fwd_path).unwrap());
    let bwd_frames = read_frames(&fs::read_to_string(&bwd_path).unwrap());
    assert_eq!(fwd_frames[0], bwd_frames[0]);
}

#[test]
fn test_empty_frame_sequence_writes_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xyz");
    write_trajectory(&[], &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}
