//! Stream bookkeeping for a media node.
//!
//! The node registers every stream it advertises under its resource id. When a connection is
//! activated the negotiated transport parameters are merged into the registered template and
//! paired with the node's file endpoints, giving a [`Config`] ready for
//! [`crate::generate_pipeline`].

use std::collections::HashMap;

use crate::config::model::{
    Config, GpuAcceleration, Mcm, Payload, St2110, Stream, StreamType, Video,
};
use crate::foundation::error::{BcsError, BcsResult};

/// Environment variable naming the transmit virtual-function port.
pub const VFIO_PORT_TX: &str = "VFIO_PORT_TX";
/// Environment variable naming the receive virtual-function port.
pub const VFIO_PORT_RX: &str = "VFIO_PORT_RX";

/// Transport parameters negotiated for one connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationParams {
    /// Negotiated video format.
    pub video: Video,
    /// Address of this node's end.
    pub local_ip: String,
    /// Address of the peer (multicast group or unicast destination).
    pub remote_ip: String,
    /// Peer UDP port.
    pub remote_port: u16,
    /// RTP payload type.
    pub payload_type: u8,
    /// Virtual-function port (PCI address) for ST 2110; MCM ignores it.
    pub interface: Option<String>,
}

impl ActivationParams {
    /// Fill [`ActivationParams::interface`] from `var` (e.g. [`VFIO_PORT_TX`]) when it is set.
    pub fn with_interface_from_env(mut self, var: &str) -> Self {
        if let Ok(value) = std::env::var(var)
            && !value.is_empty()
        {
            self.interface = Some(value);
        }
        self
    }
}

/// File senders of `cfg`, in declaration order.
pub fn file_senders(cfg: &Config) -> Vec<Stream> {
    file_streams(&cfg.senders)
}

/// File receivers of `cfg`, in declaration order.
pub fn file_receivers(cfg: &Config) -> Vec<Stream> {
    file_streams(&cfg.receivers)
}

fn file_streams(streams: &[Stream]) -> Vec<Stream> {
    streams
        .iter()
        .filter(|s| s.stream_type.is_file())
        .cloned()
        .collect()
}

fn require_video(streams: Vec<Stream>, side: &str) -> BcsResult<Vec<Stream>> {
    for (i, s) in streams.iter().enumerate() {
        if s.payload.as_video().is_none() {
            return Err(BcsError::incompatible(format!(
                "file {side} {i} carries {}, activation pipelines are video only",
                s.payload.kind()
            )));
        }
    }
    Ok(streams)
}

/// Merge negotiated parameters into a registered network stream.
pub fn network_stream(template: &Stream, params: &ActivationParams) -> BcsResult<Stream> {
    let stream_type = match &template.stream_type {
        StreamType::File(_) => {
            return Err(BcsError::validation(
                "file streams are not activated through connections",
            ));
        }
        StreamType::St2110(st) => {
            let interface = params
                .interface
                .clone()
                .filter(|i| !i.is_empty())
                .ok_or_else(|| {
                    BcsError::missing("st2110 activation needs a virtual-function interface")
                })?;
            StreamType::St2110(St2110 {
                network_interface: interface,
                local_ip: params.local_ip.clone(),
                remote_ip: params.remote_ip.clone(),
                transport: st.transport,
                remote_port: params.remote_port,
                payload_type: params.payload_type,
                queues_cnt: st.queues_cnt,
            })
        }
        StreamType::Mcm(mcm) => StreamType::Mcm(Mcm {
            ip: params.remote_ip.clone(),
            port: params.remote_port,
            ..mcm.clone()
        }),
    };
    Ok(Stream::new(Payload::Video(params.video.clone()), stream_type))
}

fn activation_config(node: &Config, senders: Vec<Stream>, receivers: Vec<Stream>) -> Config {
    if node.gpu_hw_acceleration == GpuAcceleration::Intel
        && node
            .gpu_hw_acceleration_device
            .as_deref()
            .is_none_or(str::is_empty)
    {
        tracing::warn!("intel acceleration selected without gpu_hw_acceleration_device");
    }
    Config {
        senders,
        receivers,
        function: node.function,
        multiviewer_columns: node.multiviewer_columns,
        gpu_hw_acceleration: node.gpu_hw_acceleration,
        gpu_hw_acceleration_device: node.gpu_hw_acceleration_device.clone(),
        stream_loop: node.stream_loop,
        logging_level: node.logging_level,
    }
}

/// Config for an activated sender: the node's file receivers feed the network stream.
pub fn sender_activation_config(
    node: &Config,
    template: &Stream,
    params: &ActivationParams,
) -> BcsResult<Config> {
    let sender = network_stream(template, params)?;
    let receivers = require_video(file_receivers(node), "receiver")?;
    Ok(activation_config(node, vec![sender], receivers))
}

/// Config for an activated receiver: the network stream feeds the node's file senders.
pub fn receiver_activation_config(
    node: &Config,
    template: &Stream,
    params: &ActivationParams,
) -> BcsResult<Config> {
    let receiver = network_stream(template, params)?;
    let senders = require_video(file_senders(node), "sender")?;
    if senders.is_empty() {
        tracing::warn!("node declares no file senders");
    }
    Ok(activation_config(node, senders, vec![receiver]))
}

/// Registered streams, plus the receivers activated so far for multi-input functions.
#[derive(Debug, Default)]
pub struct StreamTracker {
    streams: HashMap<String, Stream>,
    connected: Vec<Stream>,
}

impl StreamTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `stream` under `id`, returning the stream it replaces.
    pub fn register(&mut self, id: impl Into<String>, stream: Stream) -> Option<Stream> {
        self.streams.insert(id.into(), stream)
    }

    /// Stream registered under `id`.
    pub fn get(&self, id: &str) -> BcsResult<&Stream> {
        self.streams
            .get(id)
            .ok_or_else(|| BcsError::missing(format!("no stream registered for '{id}'")))
    }

    /// Number of registered streams.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Receivers activated so far.
    pub fn connected_receivers(&self) -> &[Stream] {
        &self.connected
    }

    /// Activate the sender registered under `id`.
    pub fn activate_sender(
        &self,
        id: &str,
        node: &Config,
        params: &ActivationParams,
    ) -> BcsResult<Config> {
        let cfg = sender_activation_config(node, self.get(id)?, params)?;
        tracing::info!(id, "sender activated");
        Ok(cfg)
    }

    /// Activate the receiver registered under `id`.
    ///
    /// Receivers accumulate until the node's declared receiver count is reached; until then
    /// this returns `Ok(None)`. A completed set is handed out once and the tracker starts over.
    pub fn activate_receiver(
        &mut self,
        id: &str,
        node: &Config,
        params: &ActivationParams,
    ) -> BcsResult<Option<Config>> {
        let receiver = network_stream(self.get(id)?, params)?;
        let declared = node.receivers.len().max(1);
        if self.connected.len() + 1 < declared {
            self.connected.push(receiver);
            tracing::info!(
                connected = self.connected.len(),
                declared,
                "waiting for remaining receivers"
            );
            return Ok(None);
        }

        let senders = require_video(file_senders(node), "sender")?;
        self.connected.push(receiver);
        let receivers = std::mem::take(&mut self.connected);
        tracing::info!(id, receivers = receivers.len(), "receivers activated");
        Ok(Some(activation_config(node, senders, receivers)))
    }

    /// Forget activated receivers, e.g. after the pipeline stopped.
    pub fn reset_connections(&mut self) {
        self.connected.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/tracker.rs"]
mod tests;
