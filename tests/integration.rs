//! Integration tests for the slide collator library

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::{Document, Stream};
use slide_collator::collate::{collate, CollateOptions, Outcome};
use slide_collator::pdf::{count_pages, extract_metadata, Encoder, EncoderChoice};
use slide_collator::report::write_report;
use slide_collator::slides::Deck;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DECK: &str = "koko-atulado";

/// Write slide `index` as an opaque PNG whose width encodes the index
fn write_slide(dir: &Path, index: u32) {
    let deck = Deck::new(dir, DECK);
    let image = RgbImage::from_pixel(10 + index, 6, Rgb([30, 60, 90]));
    image.save(deck.slide_path(index)).expect("Failed to write slide");
}

fn options_for(dir: &Path, encoder: EncoderChoice) -> CollateOptions {
    CollateOptions {
        deck: Deck::new(dir, DECK),
        output: None,
        encoder,
    }
}

/// Image XObject on each page, in page order
fn page_images(doc: &Document) -> Vec<&Stream> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
            doc.get_object(image_id).unwrap().as_stream().unwrap()
        })
        .collect()
}

/// Slide indices recovered from the image widths, in page order
fn page_indices(pdf: &Path) -> Vec<u32> {
    let doc = Document::load(pdf).expect("Failed to load output PDF");
    page_images(&doc)
        .iter()
        .map(|image| image.dict.get(b"Width").unwrap().as_i64().unwrap() as u32 - 10)
        .collect()
}

#[cfg(feature = "passthrough")]
#[test]
fn test_full_deck() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for index in 1..=18 {
        write_slide(temp_dir.path(), index);
    }

    let options = options_for(temp_dir.path(), EncoderChoice::Auto);
    let outcome = collate(&options).expect("Failed to collate");

    let Outcome::Written { ref summary, .. } = outcome else {
        panic!("expected a written PDF, got {:?}", outcome);
    };
    assert_eq!(summary.encoder, Encoder::Passthrough);
    assert_eq!(summary.pages, 18);
    assert_eq!(summary.output, temp_dir.path().join("koko-atulado-final.pdf"));
    assert_eq!(summary.bytes, fs::metadata(&summary.output).unwrap().len());

    assert_eq!(count_pages(&summary.output).unwrap(), 18);
    assert_eq!(page_indices(&summary.output), (1..=18).collect::<Vec<_>>());

    let mut report = Vec::new();
    write_report(&mut report, &options, &outcome).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("18/18"));
    assert!(!report.contains("(missing)"));
}

#[cfg(feature = "passthrough")]
#[test]
fn test_partial_deck_keeps_index_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    // Written out of order so directory listing order can't help
    for index in [10, 1, 5] {
        write_slide(temp_dir.path(), index);
    }

    let options = options_for(temp_dir.path(), EncoderChoice::Auto);
    let outcome = collate(&options).expect("Failed to collate");

    let Outcome::Written { ref slides, ref summary } = outcome else {
        panic!("expected a written PDF, got {:?}", outcome);
    };
    assert_eq!(summary.pages, 3);
    assert_eq!(slides.missing.len(), 15);
    assert_eq!(page_indices(&summary.output), vec![1, 5, 10]);

    let mut report = Vec::new();
    write_report(&mut report, &options, &outcome).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("3/18"));
    for slide in &slides.missing {
        assert!(report.contains(&format!("{} (missing)", slide.file_name())));
    }
}

#[test]
fn test_no_slides_writes_no_pdf() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = options_for(temp_dir.path(), EncoderChoice::Auto);

    let outcome = collate(&options).expect("Failed to collate");
    assert!(!outcome.is_written());
    assert!(!temp_dir.path().join("koko-atulado-final.pdf").exists());

    let mut report = Vec::new();
    write_report(&mut report, &options, &outcome).unwrap();
    assert!(String::from_utf8(report).unwrap().contains("Error"));
}

#[cfg(feature = "passthrough")]
#[test]
fn test_repeat_runs_match() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for index in [2, 3, 17] {
        write_slide(temp_dir.path(), index);
    }
    let options = options_for(temp_dir.path(), EncoderChoice::Auto);
    let output = options.output_path();

    collate(&options).expect("First run failed");
    let first = page_indices(&output);

    collate(&options).expect("Second run failed");
    let second = page_indices(&output);

    assert_eq!(first, vec![2, 3, 17]);
    assert_eq!(first, second);
}

#[cfg(feature = "passthrough")]
#[test]
fn test_overwrites_existing_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_slide(temp_dir.path(), 1);

    let options = options_for(temp_dir.path(), EncoderChoice::Auto);
    fs::write(options.output_path(), b"stale").unwrap();

    collate(&options).expect("Failed to collate");
    assert_eq!(count_pages(&options.output_path()).unwrap(), 1);
}

#[cfg(feature = "passthrough")]
#[test]
fn test_metadata_names_the_deck() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_slide(temp_dir.path(), 4);

    let options = options_for(temp_dir.path(), EncoderChoice::Auto);
    collate(&options).expect("Failed to collate");

    let metadata = extract_metadata(&options.output_path()).unwrap();
    assert_eq!(metadata.page_count, 1);
    assert_eq!(metadata.title.as_deref(), Some(DECK));
    assert!(metadata.producer.unwrap().starts_with("slide-collator"));
}

#[cfg(feature = "passthrough")]
#[test]
fn test_stray_slides_are_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_slide(temp_dir.path(), 1);
    // Unpadded and out of range; neither belongs to the deck
    RgbImage::new(4, 4).save(temp_dir.path().join("koko-atulado-slide-2.png")).unwrap();
    RgbImage::new(4, 4).save(temp_dir.path().join("koko-atulado-slide-19.png")).unwrap();

    let options = options_for(temp_dir.path(), EncoderChoice::Auto);
    collate(&options).expect("Failed to collate");

    assert_eq!(page_indices(&options.output_path()), vec![1]);
}

#[cfg(feature = "passthrough")]
#[test]
fn test_passthrough_refuses_alpha_and_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_slide(temp_dir.path(), 1);
    let deck = Deck::new(temp_dir.path(), DECK);
    RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]))
        .save(deck.slide_path(2))
        .unwrap();

    let options = options_for(
        temp_dir.path(),
        EncoderChoice::Only(Encoder::Passthrough),
    );
    let result = collate(&options);

    assert!(result.is_err(), "alpha slides can't pass through");
    let message = result.unwrap_err().to_string();
    assert!(message.contains("alpha"), "unexpected error: {}", message);
    assert!(!options.output_path().exists());
}

#[cfg(feature = "raster")]
#[test]
fn test_raster_fallback_matches_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for index in [1, 5, 10] {
        write_slide(temp_dir.path(), index);
    }

    let options = options_for(temp_dir.path(), EncoderChoice::Only(Encoder::Raster));
    let outcome = collate(&options).expect("Failed to collate");

    let Outcome::Written { summary, .. } = outcome else {
        panic!("expected a written PDF");
    };
    assert_eq!(summary.encoder, Encoder::Raster);
    assert_eq!(summary.pages, 3);
    assert_eq!(page_indices(&summary.output), vec![1, 5, 10]);

    let doc = Document::load(&summary.output).unwrap();
    for image in page_images(&doc) {
        let filter = image.dict.get(b"Filter").unwrap().as_name().unwrap();
        assert_eq!(filter, &b"DCTDecode"[..]);
        assert!(image.dict.get(b"SMask").is_err(), "raster pages must be opaque");
    }
}

#[cfg(feature = "raster")]
#[test]
fn test_raster_flattens_transparency_onto_white() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let deck = Deck::new(temp_dir.path(), DECK);

    // Left half fully transparent red, right half opaque black
    let mut slide = RgbaImage::new(16, 16);
    for (x, _, pixel) in slide.enumerate_pixels_mut() {
        *pixel = if x < 8 { Rgba([255, 0, 0, 0]) } else { Rgba([0, 0, 0, 255]) };
    }
    slide.save(deck.slide_path(1)).unwrap();

    let options = options_for(temp_dir.path(), EncoderChoice::Only(Encoder::Raster));
    collate(&options).expect("Failed to collate");

    let doc = Document::load(options.output_path()).unwrap();
    let images = page_images(&doc);
    let page = image::load_from_memory(&images[0].content)
        .expect("Page is not a JPEG")
        .to_rgb8();

    // JPEG is lossy; sample away from the edge between halves
    let transparent = page.get_pixel(2, 8).0;
    let opaque = page.get_pixel(13, 8).0;
    assert!(transparent.iter().all(|&c| c >= 245), "expected white, got {:?}", transparent);
    assert!(opaque.iter().all(|&c| c <= 10), "expected black, got {:?}", opaque);
}
