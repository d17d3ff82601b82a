//! Prints the constant-area fields of an SE1 file for manual inspection.
//! Not a supported interface; a development aid only.

use ephem_parser::parser::header;
use ephem_parser::reader::ByteReader;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: dump_header <path-to-se1-file>");
            process::exit(1);
        }
    };

    let data = std::fs::read(&path).expect("reading input file");
    let mut reader = ByteReader::new(&data);
    let parsed = header::parse_header(&mut reader).expect("parsing header");

    println!("endian: {:?}", parsed.endian);
    println!(
        "validity: [{}, {}]",
        parsed.extent.tfstart_file, parsed.extent.tfend_file
    );
    println!("bodies: {}", parsed.bodies.len());
    for body in &parsed.bodies {
        println!(
            "  body {}: ncoe={} rmax={} flags={:?} window=[{}, {}]",
            body.body_id.0, body.ncoe, body.rmax, body.flags, body.tfstart, body.tfend
        );
    }
}
