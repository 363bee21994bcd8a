//! Integration tests for the CSC client public API.
//!
//! Drives a client through the dispatcher the way a stack event loop would:
//! connect, discovery, CCCD write, notifications, disconnect.

use std::cell::RefCell;

use cscs_client::ble::discovery::{CSC_MEASUREMENT, CSC_SERVICE};
use cscs_client::ble::{
    DiscoveredCharacteristic, DiscoveredService, DiscoveryEvent, DiscoveryEventKind,
    DiscoveryRegistry, HvxType, WriteOp,
};
use cscs_client::config::CSCS_OBSERVER_PRIO;
use cscs_client::{
    AttHandle, BleEvent, ClientState, ConnHandle, CscsClient, CscsClientConfig, CscsEvent,
    Dispatcher, GattQueue, GattRequest, RevolutionRate, TransportError, Uuid,
};

#[derive(Default)]
struct Stack {
    watched: Vec<Uuid>,
    registered: Vec<ConnHandle>,
    requests: Vec<GattRequest>,
}

impl DiscoveryRegistry for Stack {
    fn register_service(&mut self, uuid: Uuid) -> Result<(), TransportError> {
        self.watched.push(uuid);
        Ok(())
    }
}

impl GattQueue for Stack {
    fn register_conn(&mut self, conn: ConnHandle) -> Result<(), TransportError> {
        self.registered.push(conn);
        Ok(())
    }

    fn submit(&mut self, request: GattRequest) -> Result<(), TransportError> {
        self.requests.push(request);
        Ok(())
    }
}

fn measurement(wheel_revs: u32, wheel_time: u16, crank_revs: u16, crank_time: u16) -> Vec<u8> {
    let mut data = vec![0x03];
    data.extend_from_slice(&wheel_revs.to_le_bytes());
    data.extend_from_slice(&wheel_time.to_le_bytes());
    data.extend_from_slice(&crank_revs.to_le_bytes());
    data.extend_from_slice(&crank_time.to_le_bytes());
    data
}

#[test]
fn connect_discover_subscribe_and_stream() {
    let conn = ConnHandle(0x0000);
    let meas = AttHandle(0x000E);
    let cccd = AttHandle(0x000F);

    let mut stack = Stack::default();
    let events: RefCell<Vec<CscsEvent>> = RefCell::new(Vec::new());

    let client = RefCell::new(
        CscsClient::init(
            CscsClientConfig {
                evt_handler: |evt: CscsEvent| events.borrow_mut().push(evt),
                error_handler: None,
            },
            &mut stack,
        )
        .expect("init"),
    );
    assert_eq!(stack.watched, vec![CSC_SERVICE]);

    let mut dispatcher: Dispatcher<'_, 2> = Dispatcher::new();
    dispatcher.register(CSCS_OBSERVER_PRIO, &client).unwrap();

    // Link up: bind before discovery runs.
    dispatcher.on_ble_evt(&BleEvent::Connected { conn });
    client
        .borrow_mut()
        .assign_connection(&mut stack, conn, None)
        .unwrap();
    assert_eq!(stack.registered, vec![conn]);

    let chars = [DiscoveredCharacteristic {
        uuid: CSC_MEASUREMENT,
        handle_decl: AttHandle(0x000D),
        handle_value: meas,
        cccd_handle: Some(cccd),
    }];
    dispatcher.on_db_disc_evt(&DiscoveryEvent {
        conn,
        kind: DiscoveryEventKind::Complete(DiscoveredService {
            srv_uuid: CSC_SERVICE,
            characteristics: &chars,
        }),
    });
    assert_eq!(client.borrow().state(), ClientState::Ready);
    assert!(matches!(
        events.borrow().last(),
        Some(CscsEvent::DiscoveryComplete { .. })
    ));

    client
        .borrow_mut()
        .enable_notifications(&mut stack)
        .unwrap();
    match stack.requests.as_slice() {
        [GattRequest::Write {
            conn: c,
            handle,
            value,
            op: WriteOp::Request,
        }] => {
            assert_eq!(*c, conn);
            assert_eq!(*handle, cccd);
            assert_eq!(value.as_slice(), &[0x01, 0x00]);
        }
        other => panic!("unexpected requests {:?}", other),
    }

    let first = measurement(1000, 0, 50, 0);
    let second = measurement(1002, 1024, 51, 512);
    for data in [&first, &second] {
        dispatcher.on_ble_evt(&BleEvent::Hvx {
            conn,
            handle: meas,
            kind: HvxType::Notification,
            data: data.as_slice(),
        });
    }

    let measurements: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|evt| match evt {
            CscsEvent::Measurement { measurement, .. } => Some(*measurement),
            _ => None,
        })
        .collect();
    assert_eq!(measurements.len(), 2);

    let rate = RevolutionRate::between(&measurements[0], &measurements[1]);
    assert_eq!(rate.wheel_rpm, Some(120.0));
    assert_eq!(rate.crank_rpm, Some(120.0));

    // Link down: state cleared, stale notifications dropped.
    dispatcher.on_ble_evt(&BleEvent::Disconnected { conn, reason: 0x08 });
    assert_eq!(client.borrow().state(), ClientState::Idle);

    let before = events.borrow().len();
    dispatcher.on_ble_evt(&BleEvent::Hvx {
        conn,
        handle: meas,
        kind: HvxType::Notification,
        data: first.as_slice(),
    });
    assert_eq!(events.borrow().len(), before);
}

#[test]
fn two_instances_share_one_dispatcher() {
    let mut stack = Stack::default();
    let left_events: RefCell<Vec<CscsEvent>> = RefCell::new(Vec::new());
    let right_events: RefCell<Vec<CscsEvent>> = RefCell::new(Vec::new());

    let left = RefCell::new(CscsClient::new(CscsClientConfig {
        evt_handler: |evt: CscsEvent| left_events.borrow_mut().push(evt),
        error_handler: None,
    }));
    let right = RefCell::new(CscsClient::new(CscsClientConfig {
        evt_handler: |evt: CscsEvent| right_events.borrow_mut().push(evt),
        error_handler: None,
    }));

    let handles = cscs_client::PeerHandles {
        measurement: Some(AttHandle(0x0010)),
        measurement_cccd: Some(AttHandle(0x0011)),
        feature: None,
        sensor_location: None,
    };
    left.borrow_mut()
        .assign_connection(&mut stack, ConnHandle(1), Some(handles))
        .unwrap();
    right
        .borrow_mut()
        .assign_connection(&mut stack, ConnHandle(2), Some(handles))
        .unwrap();

    let mut dispatcher: Dispatcher<'_, 2> = Dispatcher::new();
    dispatcher.register(CSCS_OBSERVER_PRIO, &left).unwrap();
    dispatcher.register(CSCS_OBSERVER_PRIO, &right).unwrap();

    dispatcher.on_ble_evt(&BleEvent::Hvx {
        conn: ConnHandle(2),
        handle: AttHandle(0x0010),
        kind: HvxType::Notification,
        data: &[0x00],
    });
    dispatcher.on_ble_evt(&BleEvent::Disconnected {
        conn: ConnHandle(1),
        reason: 0x13,
    });

    assert!(left_events.borrow().is_empty());
    assert_eq!(right_events.borrow().len(), 1);
    assert_eq!(left.borrow().state(), ClientState::Idle);
    assert_eq!(right.borrow().state(), ClientState::Ready);
}
