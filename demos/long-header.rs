use banner_gen::{BannerGenerator, Config, Font, Image};
use lipsum::lipsum;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: long-header <background> <font> <output>");
        std::process::exit(1);
    }

    let font = Font::load_from_disk(&args[2]).expect("can load font");
    let mut config = Config::new(font);
    config.set_background(Image::open(&args[1]).expect("can load background"));

    // well past the 60-character mark, so the header goes through the
    // font-size search before wrapping
    let header = lipsum(20);

    let generator = BannerGenerator::new(config);
    generator
        .generate_file(&args[3], &header, &lipsum(6), None, None)
        .expect("can generate banner");
}
