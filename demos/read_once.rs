extern crate canframe;
extern crate env_logger;
extern crate log;

use canframe::CanChannel;

fn main() {
    env_logger::init();
    let ifname = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CANFRAME_TEST_IFACE").ok())
        .unwrap_or_else(|| "vcan0".to_owned());
    let mut bus = CanChannel::open(&ifname).unwrap();

    loop {
        match bus.read_frame() {
            Ok(frame) => log::info!("{:#X}", frame),
            Err(e) => { log::error!("Error: {}", e); break; },
        }
    }
}
