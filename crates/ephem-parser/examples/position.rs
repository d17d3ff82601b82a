//! Prints a body's position at a given Julian date. Not a supported
//! interface; a development aid only.

use ephem_parser::{BodyId, EphemerisFile};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let (path, body_id, jd) = match (args.next(), args.next(), args.next()) {
        (Some(path), Some(body_id), Some(jd)) => (
            path,
            body_id.parse::<i32>().expect("body id must be an integer"),
            jd.parse::<f64>().expect("jd must be a number"),
        ),
        _ => {
            eprintln!("usage: position <path-to-se1-file> <body-id> <jd>");
            process::exit(1);
        }
    };

    let file = EphemerisFile::open(&path).expect("opening ephemeris file");
    let pos = file
        .position(BodyId::new(body_id), jd)
        .expect("computing position");
    println!("{:?}", pos);
}
