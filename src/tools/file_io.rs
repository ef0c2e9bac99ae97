use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};

use log::{debug, error, info, trace, warn};

use crate::compression::decompress::Header;
use crate::compression::Codec;
use crate::error::{CodecError, Result};

use super::cli::{Mode, Output, PpOpts};

/// Suffix added to compressed files.
pub const SUFFIX: &str = ".pp";
/// Suffix used on decompression when the input name does not end in SUFFIX.
pub const FALLBACK_SUFFIX: &str = ".out";

/*
    Each input file is one payload. The codec keeps one guess table for the whole run and
    resets it for every file.

    An input file is removed only after its output has been written in full.
*/

/// Process every file named in opts, or standard input when there are none.
/// Returns the number of inputs that failed. Failures are logged and do not stop the run.
pub fn run(opts: &PpOpts) -> usize {
    let mut codec = Codec::new();

    if opts.files.is_empty() {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return match process_stream(&mut codec, opts.op_mode, stdin.lock(), stdout.lock()) {
            Ok(()) => 0,
            Err(e) => {
                error!("(stdin): {}", e);
                1
            }
        };
    }

    opts.files
        .iter()
        .filter(|name| match process_file(&mut codec, opts, name) {
            Ok(()) => false,
            Err(e) => {
                error!("{}: {}", name, e);
                true
            }
        })
        .count()
}

/// Compress, decompress or test a whole stream as one payload.
pub fn process_stream<R: Read, W: Write>(
    codec: &mut Codec,
    mode: Mode,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    match mode {
        Mode::Zip => output.write_all(&compress_logged(codec, "(stdin)", &data)?)?,
        Mode::Unzip => output.write_all(&decompress_logged(codec, "(stdin)", &data)?)?,
        Mode::Test => verify(codec, "(stdin)", &data)?,
    }
    output.flush()?;
    Ok(())
}

/// Handle one named file according to opts.
pub fn process_file(codec: &mut Codec, opts: &PpOpts, name: &str) -> Result<()> {
    let data = fs::read(name)?;

    let (result, out_name) = match opts.op_mode {
        Mode::Zip => {
            if name.ends_with(SUFFIX) {
                warn!("{} already has {} suffix", name, SUFFIX);
            }
            (compress_logged(codec, name, &data)?, compressed_name(name))
        }
        Mode::Unzip => (decompress_logged(codec, name, &data)?, decompressed_name(name)),
        Mode::Test => {
            verify(codec, name, &data)?;
            info!("{}: ok", name);
            return Ok(());
        }
    };

    match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&result)?;
            lock.flush()?;
        }
        Output::File => {
            write_new(&out_name, &result, opts.force_overwrite)?;
            info!("Wrote {}", out_name);
            if !opts.keep_input_files {
                fs::remove_file(name)?;
                debug!("Removed {}", name);
            }
        }
    }
    Ok(())
}

fn compress_logged(codec: &mut Codec, name: &str, data: &[u8]) -> Result<Vec<u8>> {
    info!("Compressing {}", name);
    let payload = codec.compress_bytes(data)?;
    debug!(
        "{}: {} -> {} bytes ({:.1}%), {} literals",
        name,
        data.len(),
        payload.len(),
        ratio(payload.len(), data.len()),
        payload[0]
    );
    Ok(payload)
}

fn decompress_logged(codec: &mut Codec, name: &str, payload: &[u8]) -> Result<Vec<u8>> {
    info!("Decompressing {}", name);
    let header = Header::parse(payload)?;
    trace!(
        "{}: {} leftovers, {} flag bytes",
        name,
        header.leftovers.len(),
        header.flags.len()
    );
    let text = codec.decompress_bytes(payload)?;
    debug!("{}: {} -> {} bytes", name, payload.len(), text.len());
    Ok(text)
}

/// Decode the payload and check that encoding the result reproduces it byte for byte.
pub fn verify(codec: &mut Codec, name: &str, payload: &[u8]) -> Result<()> {
    let text = decompress_logged(codec, name, payload)?;
    let again = codec.compress_bytes(&text)?;
    if again != payload {
        return Err(CodecError::Integrity {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Write data to a new file, refusing to replace an existing one unless forced.
fn write_new(name: &str, data: &[u8], force: bool) -> Result<()> {
    let mut f_out = OpenOptions::new()
        .write(true)
        .create(force)
        .create_new(!force)
        .truncate(force)
        .open(name)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists, use -f to overwrite", name),
            ),
            _ => e,
        })?;
    f_out.write_all(data)?;
    Ok(())
}

pub fn compressed_name(name: &str) -> String {
    format!("{}{}", name, SUFFIX)
}

pub fn decompressed_name(name: &str) -> String {
    match name.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() && !stem.ends_with('/') => stem.to_string(),
        _ => format!("{}{}", name, FALLBACK_SUFFIX),
    }
}

fn ratio(out: usize, input: usize) -> f64 {
    out as f64 * 100.0 / input.max(1) as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::{Path, PathBuf};

    /// A fresh path in the temp directory for this test.
    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("payload-predictor-{}-{}", std::process::id(), tag))
    }

    fn file_opts(mode: Mode, name: &Path) -> PpOpts {
        PpOpts {
            files: vec![name.to_string_lossy().into_owned()],
            op_mode: mode,
            ..PpOpts::new()
        }
    }

    #[test]
    fn names() {
        assert_eq!(compressed_name("notes.txt"), "notes.txt.pp");
        assert_eq!(decompressed_name("notes.txt.pp"), "notes.txt");
        assert_eq!(decompressed_name("notes.txt"), "notes.txt.out");
        assert_eq!(decompressed_name(".pp"), ".pp.out");
    }

    #[test]
    fn stream_round_trip() {
        let mut codec = Codec::new();
        let mut packed = Vec::new();
        process_stream(&mut codec, Mode::Zip, &b"abababab"[..], &mut packed).unwrap();
        assert_eq!(packed, [4, b'a', b'b', b'a', b'b', 0b1111_0000]);

        let mut unpacked = Vec::new();
        process_stream(&mut codec, Mode::Unzip, &packed[..], &mut unpacked).unwrap();
        assert_eq!(unpacked, b"abababab");

        let mut nothing = Vec::new();
        process_stream(&mut codec, Mode::Test, &packed[..], &mut nothing).unwrap();
        assert!(nothing.is_empty());
    }

    #[test]
    fn stream_errors() {
        let mut codec = Codec::new();
        let mut out = Vec::new();
        assert!(matches!(
            process_stream(&mut codec, Mode::Zip, &b""[..], &mut out),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            process_stream(&mut codec, Mode::Unzip, &[9, b'a'][..], &mut out),
            Err(CodecError::Format(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn verify_rejects_non_canonical_payload() {
        let mut codec = Codec::new();
        assert!(verify(&mut codec, "ok", &[2, b'a', b'b', 0b0000_0100]).is_ok());

        // Decodes to "ab " too, but stores the space as a literal the table already predicts.
        let err = verify(&mut codec, "bad", &[3, b'a', b'b', b' ', 0]).unwrap_err();
        assert!(matches!(err, CodecError::Integrity { ref name } if name == "bad"));
    }

    #[test]
    fn file_round_trip() {
        let src = temp_path("round.txt");
        fs::write(&src, "mississippi").unwrap();
        let mut codec = Codec::new();

        let zip = file_opts(Mode::Zip, &src);
        process_file(&mut codec, &zip, &zip.files[0]).unwrap();
        assert!(!src.exists());
        let packed = PathBuf::from(compressed_name(&zip.files[0]));
        assert!(packed.exists());

        let test = file_opts(Mode::Test, &packed);
        process_file(&mut codec, &test, &test.files[0]).unwrap();

        let unzip = file_opts(Mode::Unzip, &packed);
        process_file(&mut codec, &unzip, &unzip.files[0]).unwrap();
        assert!(!packed.exists());
        assert_eq!(fs::read_to_string(&src).unwrap(), "mississippi");
        fs::remove_file(&src).unwrap();
    }

    #[test]
    fn existing_output_needs_force() {
        let src = temp_path("force.txt");
        let out = PathBuf::from(compressed_name(&src.to_string_lossy()));
        fs::write(&src, "hello").unwrap();
        fs::write(&out, "old").unwrap();
        let mut codec = Codec::new();

        let mut opts = file_opts(Mode::Zip, &src);
        let err = process_file(&mut codec, &opts, &opts.files[0]).unwrap_err();
        assert!(matches!(err, CodecError::Io(ref e) if e.kind() == io::ErrorKind::AlreadyExists));
        // Input survives a failed write
        assert!(src.exists());

        opts.force_overwrite = true;
        opts.keep_input_files = true;
        process_file(&mut codec, &opts, &opts.files[0]).unwrap();
        assert!(src.exists());
        assert_eq!(fs::read(&out).unwrap(), Codec::new().compress("hello").unwrap());

        fs::remove_file(&src).unwrap();
        fs::remove_file(&out).unwrap();
    }

    #[test]
    fn run_counts_failures() {
        let good = temp_path("good.txt");
        let empty = temp_path("empty.txt");
        let missing = temp_path("missing.txt");
        fs::write(&good, "good").unwrap();
        fs::write(&empty, "").unwrap();

        let opts = PpOpts {
            files: [&good, &empty, &missing]
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            keep_input_files: true,
            ..PpOpts::new()
        };
        assert_eq!(run(&opts), 2);

        let packed = compressed_name(&opts.files[0]);
        assert!(Path::new(&packed).exists());
        fs::remove_file(&packed).unwrap();
        fs::remove_file(&good).unwrap();
        fs::remove_file(&empty).unwrap();
    }
}
