use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use xz::bufread::XzDecoder;

use crate::errors::{Error, Result};
use crate::etl::parse_osm::ElementStream;
use crate::etl::Etl;
use crate::rdf::TurtleWriter;
use crate::transform::Converter;

pub const ETL_NAME: &str = "dump_to_ttl";
const PROGRESS_INTERVAL: u64 = 100_000;

/// Rendered blocks in document order; `None` marks a filtered element.
pub type BlockStream<'a> = Box<dyn Iterator<Item = Result<Option<Vec<String>>>> + 'a>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub emitted: u64,
    pub skipped: u64,
}

/// Opens an OSM XML dump, decompressing `.xz` files on the fly.
pub fn open_dump(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = fs::File::open(path)?;
    let file_reader = BufReader::new(file);
    if path.extension().is_some_and(|extension| extension == "xz") {
        let xz_reader = XzDecoder::new(file_reader);
        Ok(Box::new(BufReader::new(xz_reader)))
    } else {
        Ok(Box::new(file_reader))
    }
}

fn convert_stream<'a, R: BufRead + 'a>(
    stream: ElementStream<R>,
    converter: &'a Converter,
) -> BlockStream<'a> {
    Box::new(stream.map(move |element| element.and_then(|element| converter.convert(element))))
}

/// Writes the prefix block followed by every emitted block.
pub fn write_blocks<W: Write>(blocks: BlockStream<'_>, out: W) -> Result<DumpSummary> {
    let mut writer = TurtleWriter::new(out);
    let mut skipped = 0;

    writer.write_prefixes()?;
    for block in blocks {
        match block? {
            Some(lines) => writer.write_block(&lines)?,
            None => skipped += 1,
        }
        let seen = writer.blocks() + skipped;
        if seen % PROGRESS_INTERVAL == 0 {
            info!(elements = seen; "Converting dump");
        }
    }
    let summary = DumpSummary {
        emitted: writer.blocks(),
        skipped,
    };
    writer.into_inner()?;

    info!(emitted = summary.emitted, skipped = summary.skipped; "Dump converted");
    Ok(summary)
}

/// Streams a whole dump from `source` into `out`.
pub fn convert_dump<R: BufRead, W: Write>(
    source: R,
    out: W,
    converter: &Converter,
) -> Result<DumpSummary> {
    write_blocks(convert_stream(ElementStream::new(source), converter), out)
}

/// Converts one dump file into `<dir>/<input file name>.ttl`.
pub struct DumpToTurtleEtl<'a> {
    input_path: PathBuf,
    converter: &'a Converter,
}

impl<'a> DumpToTurtleEtl<'a> {
    pub fn new(input_path: impl Into<PathBuf>, converter: &'a Converter) -> Self {
        DumpToTurtleEtl {
            input_path: input_path.into(),
            converter,
        }
    }
}

impl<'a> Etl for DumpToTurtleEtl<'a> {
    type Input = ElementStream<Box<dyn BufRead>>;
    type Output = BlockStream<'a>;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn output_path(&self, dir: &Path) -> Result<PathBuf> {
        let input_fname = self.input_path.file_name().ok_or_else(|| {
            Error::Config(format!("{} has no file name", self.input_path.display()))
        })?;
        let mut output_fname = input_fname.to_os_string();
        output_fname.push(".ttl");
        Ok(dir.join(output_fname))
    }

    fn extract(&mut self, _dir: &Path) -> Result<Self::Input> {
        Ok(ElementStream::new(open_dump(&self.input_path)?))
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        Ok(convert_stream(input, self.converter))
    }

    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()> {
        let output_path = self.output_path(dir)?;
        let output_file = BufWriter::new(fs::File::create(&output_path)?);
        if let Err(err) = write_blocks(output, output_file) {
            // A partial document is not valid output.
            fs::remove_file(&output_path)?;
            return Err(err);
        }
        Ok(())
    }
}
