use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn tmp_path(name: &str) -> PathBuf {
    let tmp_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("cricom_cli");
    fs::create_dir_all(&tmp_dir).ok();
    let path = tmp_dir.join(name);
    fs::remove_file(&path).ok();
    path
}

fn run_cricom(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cricom"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute cricom")
}

fn text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string() + &String::from_utf8_lossy(&output.stdout)
}

#[test]
fn test_encode_decode_defaults() {
    let wav = tmp_path("defaults.wav");

    let encoded = run_cricom(&["encode", wav.to_str().unwrap()]);
    assert!(encoded.status.success(), "Encode failed: {}", text(&encoded));
    assert!(text(&encoded).contains("done"));
    assert!(wav.exists(), "Output file was not created");

    let decoded = run_cricom(&["decode", wav.to_str().unwrap()]);
    assert!(decoded.status.success(), "Decode failed: {}", text(&decoded));
    assert!(
        text(&decoded).contains("communicated message is 'sos'!"),
        "Unexpected decode output: {}",
        text(&decoded)
    );
}

#[test]
fn test_wav_header_matches_parameters() {
    let wav = tmp_path("header.wav");

    let encoded = run_cricom(&["encode", wav.to_str().unwrap(), "-m", "e", "-s", "8000", "-l", "50"]);
    assert!(encoded.status.success(), "Encode failed: {}", text(&encoded));

    let reader = hound::WavReader::open(&wav).expect("Failed to open output");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 16);
    // "e" is one dit plus its gaps: 4 slots of 400 samples
    assert_eq!(reader.len(), 4 * 400);
}

#[test]
fn test_custom_parameters_round_trip() {
    let wav = tmp_path("custom.wav");

    let encoded = run_cricom(&[
        "encode",
        wav.to_str().unwrap(),
        "--message",
        "Hello World",
        "--carrier",
        "800",
        "--samplerate",
        "8000",
        "--morselength",
        "50",
    ]);
    assert!(encoded.status.success(), "Encode failed: {}", text(&encoded));
    assert!(text(&encoded).contains("message: 'hello world'"));

    let decoded = run_cricom(&["decode", wav.to_str().unwrap(), "-c", "800", "-l", "50"]);
    assert!(decoded.status.success(), "Decode failed: {}", text(&decoded));
    assert!(
        text(&decoded).contains("communicated message is 'hello world'!"),
        "Unexpected decode output: {}",
        text(&decoded)
    );
}

#[test]
fn test_encode_refuses_overwrite_without_force() {
    let wav = tmp_path("overwrite.wav");
    fs::write(&wav, b"not a wav").unwrap();

    let refused = run_cricom(&["encode", wav.to_str().unwrap()]);
    assert_eq!(refused.status.code(), Some(1));
    assert!(text(&refused).contains("does already exist"), "Got: {}", text(&refused));
    assert_eq!(fs::read(&wav).unwrap(), b"not a wav");

    let forced = run_cricom(&["encode", wav.to_str().unwrap(), "-f"]);
    assert!(forced.status.success(), "Forced encode failed: {}", text(&forced));
    assert!(hound::WavReader::open(&wav).is_ok());
}

#[test]
fn test_decode_missing_file() {
    let wav = tmp_path("missing.wav");

    let output = run_cricom(&["decode", wav.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output).contains("could not access file"), "Got: {}", text(&output));
}

#[test]
fn test_encode_unknown_symbol() {
    let wav = tmp_path("unknown.wav");

    let output = run_cricom(&["encode", wav.to_str().unwrap(), "-m", "sos #"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output).contains("[!] Error:"), "Got: {}", text(&output));
    assert!(text(&output).contains("No Morse code for symbol '#'"));
    assert!(!wav.exists(), "No file should be written on failure");
}

#[test]
fn test_encode_empty_message() {
    let wav = tmp_path("empty.wav");

    let output = run_cricom(&["encode", wav.to_str().unwrap(), "-m", ""]);
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output).contains("please provide a message"), "Got: {}", text(&output));
    assert!(!wav.exists());
}

#[test]
fn test_decode_silent_file() {
    let wav = tmp_path("silent.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 7119,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&wav, spec).unwrap();
    for _ in 0..7119 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let output = run_cricom(&["decode", wav.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output).contains("silent"), "Got: {}", text(&output));
}
