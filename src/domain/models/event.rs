use tui_textarea::Input;

use super::Epoch;
use super::GatewayReply;

#[derive(Debug)]
pub enum Event {
    GatewayReply(Epoch, GatewayReply),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
