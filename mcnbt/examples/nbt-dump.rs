use std::io::{self, Read};

use mcnbt::Compression;

//
// This example reads gzipped NBT, such as a level.dat, from stdin and dumps it
// as JSON.
//

fn main() {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input).unwrap();

    let root = mcnbt::parse(&input, Compression::Gzip).unwrap();
    println!("{}", serde_json::to_string_pretty(&root).unwrap());
}
