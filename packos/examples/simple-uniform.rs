use packos::{InputItem, SquarePacker};

fn main() {
    env_logger::init();

    let mut packer = SquarePacker::new(256).padding(1);
    packer.extend((0..5).map(|id| InputItem::new(id, (128, 128))));

    let result = packer.pack();

    println!("Pack result: {:#?}", result);
}
