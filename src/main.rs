//! usb2usb firmware entry point (RP2040).
//!
//! Task layout:
//! - `pipeline_task`: owns the whole event pipeline (classifier, input
//!   queue, remap engine, output queue, encoder). Single consumer of
//!   transport notifications, single producer of wire frames.
//! - `usb_device_task`: runs the Embassy USB device stack on the
//!   native USB controller.
//! - `writer_task`: drains wire frames into the HID interrupt
//!   endpoint.
//!
//! The upstream host port (PIO-USB on PIO0, where the physical
//! keyboard and mouse plug in) is serviced by its own driver, which
//! feeds [`host_events`] and consumes [`poll_requests`]. Everything
//! downstream of that channel pair is hardware-independent.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::peripherals::USB;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Instant, Timer};
use panic_probe as _;

use usb2usb::engine::RemapEngine;
use usb2usb::events::{InputQueue, OutputQueue};
use usb2usb::host::classifier::Classifier;
use usb2usb::host::{HostBus, HostEvent, TickSource};
use usb2usb::usb::hid_device::{self, ChannelReportSink, UsbHidDevice, WireChannel};
use usb2usb::usb::output;

/// Ask the host port to arm the next interrupt-IN transfer for one
/// attached interface.
#[derive(Clone, Copy, Debug)]
pub struct PollRequest {
    pub address: u8,
    pub instance: u8,
}

static HOST_EVENTS: Channel<CriticalSectionRawMutex, HostEvent, 16> = Channel::new();
static POLL_REQUESTS: Channel<CriticalSectionRawMutex, PollRequest, 16> = Channel::new();
static WIRE_FRAMES: WireChannel = Channel::new();

/// Where the host-port driver publishes mount/report/unmount
/// notifications.
pub fn host_events() -> Sender<'static, CriticalSectionRawMutex, HostEvent, 16> {
    HOST_EVENTS.sender()
}

/// Where the host-port driver picks up poll requests.
pub fn poll_requests() -> Receiver<'static, CriticalSectionRawMutex, PollRequest, 16> {
    POLL_REQUESTS.receiver()
}

/// [`HostBus`] implementation that forwards poll requests to the
/// host-port driver. Non-blocking: a full request channel means the
/// port is saturated and the request is dropped.
struct ChannelHostBus {
    tx: Sender<'static, CriticalSectionRawMutex, PollRequest, 16>,
}

impl HostBus for ChannelHostBus {
    fn request_next_report(&mut self, address: u8, instance: u8) -> bool {
        self.tx.try_send(PollRequest { address, instance }).is_ok()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("usb2usb starting");

    let p = embassy_rp::init(Default::default());

    let UsbHidDevice { device, writer } = hid_device::init(p.USB);

    spawner.spawn(usb_device_task(device)).unwrap();
    spawner.spawn(writer_task(writer)).unwrap();
    spawner.spawn(pipeline_task()).unwrap();
}

#[embassy_executor::task]
async fn usb_device_task(
    device: embassy_usb::UsbDevice<'static, embassy_rp::usb::Driver<'static, USB>>,
) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn writer_task(
    writer: embassy_usb::class::hid::HidWriter<
        'static,
        embassy_rp::usb::Driver<'static, USB>,
        { usb2usb::config::KEYBOARD_WIRE_LEN },
    >,
) -> ! {
    hid_device::hid_writer_task(writer, WIRE_FRAMES.receiver()).await
}

/// The event pipeline, on one cooperative task.
///
/// Each iteration waits for either the next transport notification or
/// the next millisecond boundary, feeds the classifier, then runs the
/// remap engine and the encoder to completion. The queues are owned
/// here and never shared.
#[embassy_executor::task]
async fn pipeline_task() -> ! {
    let mut classifier = Classifier::new();
    let mut engine = RemapEngine::new();
    let mut input = InputQueue::new();
    let mut output_queue = OutputQueue::new();
    let mut ticks = TickSource::new();
    let mut bus = ChannelHostBus {
        tx: POLL_REQUESTS.sender(),
    };
    let mut sink = ChannelReportSink::new(&WIRE_FRAMES);

    let events = HOST_EVENTS.receiver();

    info!("pipeline task started");

    loop {
        let now_us = Instant::now().as_micros() as u32;
        let now_ms = Instant::now().as_millis() as u32;

        if let Some(tick) = ticks.poll(now_us) {
            classifier.on_tick(tick, &mut input, now_ms);
        }

        match select(events.receive(), Timer::after_millis(1)).await {
            Either::First(event) => match event {
                HostEvent::Mount {
                    address,
                    instance,
                    protocol,
                    descriptor,
                } => {
                    info!("device mounted: addr={} instance={}", address, instance);
                    classifier.on_device_mount(
                        address,
                        instance,
                        protocol,
                        &descriptor,
                        &mut bus,
                        &mut input,
                        now_ms,
                    );
                }
                HostEvent::Report {
                    address,
                    instance,
                    data,
                } => {
                    classifier.on_report_received(
                        address,
                        instance,
                        &data,
                        &mut bus,
                        &mut input,
                        now_ms,
                    );
                }
                HostEvent::Unmount { address, instance } => {
                    info!("device unmounted: addr={} instance={}", address, instance);
                    classifier.on_device_unmount(address, instance, &mut input, now_ms);
                }
            },
            Either::Second(()) => {}
        }

        engine.process(&mut input, &mut output_queue);
        output::drain(&mut output_queue, &mut sink);
    }
}
