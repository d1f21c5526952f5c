use std::io::Write;

use crate::errors::Result;

use super::vocab::PREFIXES;

/// Streams a Turtle document: the prefix preamble once, then one block per
/// element, each followed by a blank line.
pub struct TurtleWriter<W: Write> {
    out: W,
    blocks: u64,
}

impl<W: Write> TurtleWriter<W> {
    pub fn new(out: W) -> Self {
        TurtleWriter { out, blocks: 0 }
    }

    pub fn write_prefixes(&mut self) -> Result<()> {
        for prefix in PREFIXES {
            writeln!(self.out, "{prefix}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn write_block(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        self.blocks += 1;
        Ok(())
    }

    /// Writes `text` as `# ` comment lines.
    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        for line in text.split('\n') {
            writeln!(self.out, "# {line}")?;
        }
        Ok(())
    }

    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn prefixes_then_blocks_separated_by_blank_lines() {
        let mut writer = TurtleWriter::new(Vec::new());
        writer.write_prefixes().unwrap();
        writer.write_block(&["osmnode:1".to_string(), "    osmm:type \"n\" ;".to_string(), ".".to_string()]).unwrap();
        writer.write_block(&["osmway:2".to_string(), ".".to_string()]).unwrap();
        assert_eq!(writer.blocks(), 2);

        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            indoc! {r#"
                PREFIX geo: <http://www.opengis.net/ont/geosparql#>
                PREFIX osmnode: <https://www.openstreetmap.org/node/>
                PREFIX osmrel: <https://www.openstreetmap.org/relation/>
                PREFIX osmway: <https://www.openstreetmap.org/way/>
                PREFIX osmm: <https://example.org/todo-meta/>
                PREFIX osmt: <https://wiki.openstreetmap.org/wiki/Key:>
                PREFIX osmx: <https://example.org/todo-xref/>
                PREFIX wikidata: <http://www.wikidata.org/entity/>
                PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>

                osmnode:1
                    osmm:type "n" ;
                .

                osmway:2
                .

            "#}
        );
    }

    #[test]
    fn comments_prefix_every_line() {
        let mut writer = TurtleWriter::new(Vec::new());
        writer.write_comment("<osm>\n</osm>").unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "# <osm>\n# </osm>\n");
    }
}
