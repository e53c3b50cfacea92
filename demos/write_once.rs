extern crate canframe;
extern crate env_logger;
extern crate log;

use std::time::Duration;

use canframe::{CanChannel, Frame};

fn main() {
    env_logger::init();
    let ifname = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CANFRAME_TEST_IFACE").ok())
        .unwrap_or_else(|| "vcan0".to_owned());
    let mut bus = CanChannel::open(&ifname).unwrap();

    let data: [u8; 4] = [222, 173, 190, 239];
    let id: u32 = 123;
    let frame = Frame::new(id, &data, false, false).unwrap();
    match bus.write_frame(&frame, Duration::from_millis(10)) {
        Ok(()) => log::info!("Frame Send Success"),
        Err(e) => log::error!("Frame Send Error {}", e),
    }
}
