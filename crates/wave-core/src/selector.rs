use rand::Rng;

use crate::enumeration::SourceFile;

/// Pick one candidate uniformly at random from an injected random source.
///
/// Callers pass the already-filtered list (the fresh enumeration minus the
/// processed set); an empty list means the run is done.
pub fn pick<'a, R: Rng + ?Sized>(
    candidates: &'a [SourceFile],
    rng: &mut R,
) -> Option<&'a SourceFile> {
    if candidates.is_empty() {
        return None;
    }
    let index = rng.random_range(0..candidates.len());
    candidates.get(index)
}
