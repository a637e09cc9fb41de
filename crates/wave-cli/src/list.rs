use std::path::Path;

use eyre::Result;
use wave_core::enumeration::enumerate_source_files;

use crate::format_bytes;

pub fn run_list(source: &Path) -> Result<()> {
    let mut files = enumerate_source_files(source)?;
    if files.is_empty() {
        println!("No candidate files under {}", source.display());
        return Ok(());
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    println!("Candidates under {}:", source.display());
    let mut total = 0u64;
    for file in &files {
        println!("FILE {:>12} {}", format_bytes(file.size), file.name);
        total += file.size;
    }
    println!("{} file(s), {} total", files.len(), format_bytes(total));
    Ok(())
}
