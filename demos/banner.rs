use banner_gen::{BannerGenerator, Config, Font, Image, SpanFont};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 9 {
        eprintln!(
            "usage: banner <background> <sub-image> <logo-first> <logo-second> \
             <header-font> <text-font> <subheader-font> <output>"
        );
        std::process::exit(1);
    }

    let text_font = Font::load_from_disk(&args[6]).expect("can load text font");
    let mut config = Config::new(text_font);

    let header_font =
        config.add_font(Font::load_from_disk(&args[5]).expect("can load header font"));
    let subheader_font =
        config.add_font(Font::load_from_disk(&args[7]).expect("can load subheader font"));
    config.header = SpanFont {
        id: header_font,
        size: 64,
    };
    config.subheader = SpanFont {
        id: subheader_font,
        size: 32,
    };

    config.set_background(Image::open(&args[1]).expect("can load background"));
    config.set_sub_image(Image::open(&args[2]).expect("can load sub-image").scaled(0.45));
    config.set_logo(
        Image::open(&args[3])
            .expect("can load first logo half")
            .scaled(0.2),
        Image::open(&args[4])
            .expect("can load second logo half")
            .scaled(0.2),
    );
    config.site = Some("anime-recommend.ru".into());

    let generator = BannerGenerator::new(config);
    generator
        .generate_file(
            &args[8],
            "Fruits Basket: The Final",
            "The best anime ever!",
            Some("フルーツバスケット The Final"),
            Some("based_on"),
        )
        .expect("can generate banner");
}
