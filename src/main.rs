// src/main.rs
use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use ndef_codec::{Message, MessageView, TextEncoding, TextRecord, UriRecord, ndef};

#[derive(Parser)]
#[command(name = "ndef-inspect", version, about = "Decode and encode NDEF messages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a hex-encoded NDEF message ("-" reads hex from stdin).
    Decode {
        hex: String,
        /// Input is a tag memory dump holding an NDEF TLV.
        #[arg(long)]
        tlv: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Encode a single Text record message and print it as hex.
    EncodeText {
        text: String,
        #[arg(long, default_value = "en")]
        lang: String,
        /// Set the UTF-16 flag in the status byte.
        #[arg(long)]
        utf16: bool,
        #[arg(long)]
        tlv: bool,
    },
    /// Encode a single URI record message and print it as hex.
    EncodeUri {
        uri: String,
        #[arg(long)]
        tlv: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Decode { hex, tlv, format } => decode(&hex, tlv, format),
        Command::EncodeText {
            text,
            lang,
            utf16,
            tlv,
        } => {
            let encoding = if utf16 {
                TextEncoding::Utf16
            } else {
                TextEncoding::Utf8
            };
            let record = TextRecord::new(encoding, &lang, &text, None)
                .with_context(|| format!("invalid language code {lang:?}"))?;
            print_encoded(&Message::from_records(vec![record.into()]), tlv)
        }
        Command::EncodeUri { uri, tlv } => {
            let record = UriRecord::from_uri(&uri, None).context("invalid uri record")?;
            print_encoded(&Message::from_records(vec![record.into()]), tlv)
        }
    }
}

fn decode(input: &str, tlv: bool, format: OutputFormat) -> Result<()> {
    let input = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        input.to_string()
    };
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        bail!("no input bytes");
    }
    let bytes = hex::decode(&compact).context("input is not valid hex")?;
    info!("decoding {} bytes", bytes.len());

    let message = if tlv {
        ndef::parse_tag_memory(&bytes)?
    } else {
        ndef::parse_message(&bytes)?
    };

    let view = MessageView::from(&message);
    let output = match format {
        OutputFormat::Json => serde_json::to_string(&view)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(&view)?,
    };
    println!("{output}");
    Ok(())
}

fn print_encoded(message: &Message, tlv: bool) -> Result<()> {
    let bytes = if tlv {
        ndef::encode_tag_memory(message)?
    } else {
        ndef::serialize_message(message)
    };
    println!("{}", hex::encode_upper(bytes));
    Ok(())
}
