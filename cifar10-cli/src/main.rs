use argh::FromArgs;
use cifar10::{
    consts::{LABEL_COUNT, PAYLOAD_LEN, RECORD_LEN},
    encode::{bmp, source_array::SourceHeader},
    CifarImage, ClassLabels,
};
use error::{
    CliError, DecodeSnafu, EncodeBmpSnafu, UnnamedLabelSnafu, WriteBmpSnafu, WriteHeaderSnafu,
    WriteRgbSnafu,
};
use snafu::{OptionExt, ResultExt};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    str::FromStr,
};
use tempfile::NamedTempFile;

mod dataset;
mod error;

/// Extracts an image from a CIFAR-10 binary batch file in three formats:
/// a C header usable with the ARM CMSIS-NN CIFAR-10 example, a raw RGB file, and a BMP file.
#[derive(FromArgs)]
struct Cli {
    /// directory the output files are written to (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// comma separated class names to use instead of the CIFAR-10 ones, one per label
    #[argh(option)]
    labels: Option<LabelList>,

    /// the binary batch file, e.g. `test_batch.bin`
    #[argh(positional)]
    input: PathBuf,
    /// index of the record to extract. A random one in 1..=10000 is picked if omitted.
    #[argh(positional)]
    index: Option<u64>,
}

struct LabelList(Vec<String>);

impl FromStr for LabelList {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names = s
            .split(',')
            .map(|name| name.trim().to_owned())
            .collect::<Vec<_>>();

        if names.len() != LABEL_COUNT || names.iter().any(|name| name.is_empty()) {
            return Err("expected 10 non-empty, comma separated class names");
        }

        Ok(LabelList(names))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli: Cli = argh::from_env();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            log::debug!("{e:?}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        output_dir,
        labels,
        input,
        index,
    } = cli;

    let label_names = labels.map(|LabelList(names)| names);
    let label_refs = label_names
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>();
    let labels = if label_names.is_some() {
        ClassLabels::new(&label_refs)
    } else {
        ClassLabels::default()
    };

    let index = index.unwrap_or_else(|| {
        let index = dataset::random_index();
        log::info!("no index given, picked record {index}");
        index
    });

    let record = dataset::read_record(&input, index)?;
    println!("From file: {}", input.display());
    println!(" Read: {RECORD_LEN} bytes @pos: {index}");

    let image = CifarImage::decode(&record).context(DecodeSnafu { index })?;
    let label = image.label();
    let label_name = labels
        .name(label)
        .context(UnnamedLabelSnafu { label })?;
    println!(" Label: {label_name}, [{label}]");

    let paths = OutputPaths::new(&output_dir, label_name, index);
    let outputs = Outputs::encode(&image, &input, index, label_name, &paths)?;
    outputs.write(&paths)
}

struct OutputPaths {
    header: PathBuf,
    rgb: PathBuf,
    bmp: PathBuf,
}

impl OutputPaths {
    /// `<dir>/<label name>_<index>.{h,rgb,bmp}`, with the index zero-padded to 5 digits.
    fn new(dir: &Path, label_name: &str, index: u64) -> Self {
        let stem = format!("{label_name}_{index:05}");

        Self {
            header: dir.join(format!("{stem}.h")),
            rgb: dir.join(format!("{stem}.rgb")),
            bmp: dir.join(format!("{stem}.bmp")),
        }
    }
}

/// All three encodings of one record, produced before any file is touched.
struct Outputs {
    header: String,
    rgb: [u8; PAYLOAD_LEN],
    bmp: Vec<u8>,
}

impl Outputs {
    fn encode(
        image: &CifarImage,
        input: &Path,
        index: u64,
        label_name: &str,
        paths: &OutputPaths,
    ) -> Result<Self, CliError> {
        let header = SourceHeader {
            dataset: &input.display().to_string(),
            index,
            label: image.label(),
            label_name,
            image,
        }
        .to_string();

        let rgb = image.to_interleaved_rgb();

        let bmp = bmp::encode_to_vec(image).context(EncodeBmpSnafu { path: &paths.bmp })?;
        log::debug!(
            "encoded {} header bytes, {} RGB bytes, {} BMP bytes",
            header.len(),
            rgb.len(),
            bmp.len()
        );

        Ok(Self { header, rgb, bmp })
    }

    /// Stages every output in a temp file next to its destination, then renames them into place.
    /// A failed rename removes the files this run already put in place.
    fn write(&self, paths: &OutputPaths) -> Result<(), CliError> {
        let header = stage(&paths.header, self.header.as_bytes()).context(WriteHeaderSnafu {
            path: &paths.header,
        })?;
        let rgb = stage(&paths.rgb, &self.rgb).context(WriteRgbSnafu { path: &paths.rgb })?;
        let bmp = stage(&paths.bmp, &self.bmp).context(WriteBmpSnafu { path: &paths.bmp })?;

        header
            .persist(&paths.header)
            .map_err(|e| e.error)
            .context(WriteHeaderSnafu {
                path: &paths.header,
            })?;
        rgb.persist(&paths.rgb)
            .map_err(|e| e.error)
            .context(WriteRgbSnafu { path: &paths.rgb })
            .map_err(|e| roll_back(&[paths.header.as_path()], e))?;
        bmp.persist(&paths.bmp)
            .map_err(|e| e.error)
            .context(WriteBmpSnafu { path: &paths.bmp })
            .map_err(|e| roll_back(&[paths.header.as_path(), paths.rgb.as_path()], e))?;

        println!(" Header file: {} saved!", paths.header.display());
        println!(" RGB file: {} saved!", paths.rgb.display());
        println!(" BMP file: {} saved!", paths.bmp.display());

        Ok(())
    }
}

/// Writes `bytes` to a hidden temp file in the directory of `path`. The file is deleted on drop
/// unless it is persisted.
fn stage(path: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = tempfile::Builder::new()
        .prefix(".cifar10-")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;

    Ok(file)
}

fn roll_back(placed: &[&Path], error: CliError) -> CliError {
    for path in placed {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("can not remove {}: {e}", path.display());
        }
    }
    error
}
