mod error;
mod wav;

use clap::{Parser, Subcommand};
use cricom_core::{
    DecodeParameters, Decoder, EncodeParameters, Encoder, DEFAULT_CARRIER_HZ, DEFAULT_MESSAGE,
    DEFAULT_SAMPLE_RATE_HZ, DEFAULT_SLOT_MS,
};
use error::{CliError, Result};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use wav::WavFile;

#[derive(Parser)]
#[command(name = "cricom")]
#[command(about = "CriCom Morse Encoder/Decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message into a WAV file
    Encode {
        /// WAV file to write
        #[arg(value_name = "WAV_FILE")]
        wav_file: PathBuf,

        /// Message to encode
        #[arg(short, long, default_value = DEFAULT_MESSAGE)]
        message: String,

        /// Carrier frequency in Hz
        #[arg(short, long, default_value_t = DEFAULT_CARRIER_HZ)]
        carrier: u32,

        /// Sample rate in Hz
        #[arg(short = 's', long = "samplerate", default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
        sample_rate: u32,

        /// Length of one 'dit' in ms
        #[arg(short = 'l', long = "morselength", default_value_t = DEFAULT_SLOT_MS)]
        slot_ms: u32,

        /// Enable overwriting
        #[arg(short, long)]
        force: bool,
    },

    /// Decode a message from a WAV file
    Decode {
        /// WAV file to read
        #[arg(value_name = "WAV_FILE")]
        wav_file: PathBuf,

        /// Carrier frequency in Hz
        #[arg(short, long, default_value_t = DEFAULT_CARRIER_HZ)]
        carrier: u32,

        /// Length of one 'dit' in ms
        #[arg(short = 'l', long = "morselength", default_value_t = DEFAULT_SLOT_MS)]
        slot_ms: u32,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            wav_file,
            message,
            carrier,
            sample_rate,
            slot_ms,
            force,
        } => encode_command(&wav_file, &message, carrier, sample_rate, slot_ms, force),
        Commands::Decode {
            wav_file,
            carrier,
            slot_ms,
        } => decode_command(&wav_file, carrier, slot_ms),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print the error, its causes and its debug form
fn report(err: &CliError) {
    eprintln!("[!] Error: {} [!]", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    eprintln!("{:?}", err);
}

fn encode_command(
    wav_path: &PathBuf,
    message: &str,
    carrier: u32,
    sample_rate: u32,
    slot_ms: u32,
    force: bool,
) -> Result<()> {
    let message = message.to_lowercase();
    if message.is_empty() {
        return Err(CliError::MissingArgument("message"));
    }
    if wav_path.exists() && !force {
        return Err(CliError::FileAlreadyExists(wav_path.clone()));
    }

    println!("encoding file '{}' using the following parameters:", wav_path.display());
    println!("\tcarrier frequency: {} Hz", carrier);
    println!("\tsample rate: {} Hz", sample_rate);
    println!("\tbase length: {} ms", slot_ms);
    println!("\tmessage: '{}'", message);

    let params = EncodeParameters::new(&message, carrier, sample_rate, slot_ms)?;
    let encoder = Encoder::new(params)?;

    let mut wav = WavFile::new(wav_path);
    encoder.encode(&mut wav)?;

    println!("Wrote {}", wav.path().display());
    println!("done");
    Ok(())
}

fn decode_command(wav_path: &PathBuf, carrier: u32, slot_ms: u32) -> Result<()> {
    if !wav_path.exists() {
        return Err(CliError::FileNotFound(wav_path.clone()));
    }

    println!("decoding file '{}' using the following parameters:", wav_path.display());
    println!("\tcarrier frequency: {} Hz", carrier);
    println!("\tbase length: {} ms", slot_ms);

    let params = DecodeParameters::new(carrier, slot_ms)?;
    let mut decoder = Decoder::new(params);

    let mut wav = WavFile::new(wav_path);
    decoder.decode(&mut wav)?;

    println!("done");
    if let Some(message) = decoder.message() {
        println!("communicated message is '{}'!", message);
    }
    Ok(())
}
