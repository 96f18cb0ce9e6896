//! Print one profile of a BCR file as x/z pairs.

use bcr_reader::{BcrDocument, Status};

fn main() -> Result<(), bcr_reader::Error> {
    let doc = BcrDocument::from_file("surface.bcr").into_result()?;

    if doc.status() == Status::IncompleteData {
        println!("warning: data section is shorter than the header declares");
    }

    println!(
        "{} x {} raster from {}",
        doc.num_points(),
        doc.num_profiles(),
        doc.manufacturer_id()
    );

    for point in doc.points_of_profile(0).unwrap_or_default() {
        println!("{:.9}\t{:.9}", point.x, point.z);
    }

    Ok(())
}
