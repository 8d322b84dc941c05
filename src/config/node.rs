//! Media-node configuration files.
//!
//! The node reads one JSON file describing every stream it may expose. Network parameters
//! (addresses, ports, interface) are not known until a connection is activated, so ST 2110 and
//! MCM entries only carry the static part here; see [`crate::node::tracker`] for the activation
//! side.

use std::path::Path;

use crate::config::model::{
    Audio, Config, File, Function, GpuAcceleration, Mcm, Payload, St2110, St2110Transport, Stream,
    StreamType, Video,
};
use crate::foundation::error::{BcsError, BcsResult};

#[derive(serde::Deserialize)]
struct NodeFile {
    logging_level: i32,
    function: Function,
    gpu_hw_acceleration: GpuAcceleration,
    #[serde(default)]
    gpu_hw_acceleration_device: Option<String>,
    #[serde(default)]
    multiviewer_columns: u32,
    #[serde(default)]
    stream_loop: i32,
    sender: Vec<NodeStream>,
    receiver: Vec<NodeStream>,
}

#[derive(serde::Deserialize)]
struct NodeStream {
    stream_payload: NodePayload,
    stream_type: NodeStreamType,
}

#[derive(serde::Deserialize)]
struct NodePayload {
    #[serde(default)]
    video: Option<Video>,
    #[serde(default)]
    audio: Option<NodeAudio>,
}

#[derive(serde::Deserialize)]
struct NodeAudio {
    channels: u32,
    #[serde(rename = "sampleRate")]
    sample_rate: u32,
    format: String,
    #[serde(rename = "packetTime")]
    packet_time: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum NodeStreamType {
    File(File),
    St2110(NodeSt2110),
    Mcm(NodeMcm),
}

#[derive(serde::Deserialize)]
struct NodeSt2110 {
    transport: St2110Transport,
    #[serde(rename = "payloadType")]
    payload_type: u8,
}

#[derive(serde::Deserialize)]
struct NodeMcm {
    conn_type: String,
    transport: String,
    #[serde(default)]
    urn: String,
    #[serde(rename = "transportPixelFormat", default)]
    transport_pixel_format: String,
}

impl NodeStream {
    fn into_stream(self) -> BcsResult<Stream> {
        let payload = match self.stream_payload {
            NodePayload {
                video: Some(video), ..
            } => Payload::Video(video),
            NodePayload {
                video: None,
                audio: Some(audio),
            } => Payload::Audio(Audio {
                channels: audio.channels,
                sample_rate: audio.sample_rate,
                format: audio.format,
                packet_time: audio.packet_time,
            }),
            NodePayload {
                video: None,
                audio: None,
            } => {
                return Err(BcsError::serde(
                    "stream_payload must contain a video or audio section",
                ));
            }
        };

        let stream_type = match self.stream_type {
            NodeStreamType::File(file) => StreamType::File(file),
            NodeStreamType::St2110(st) => StreamType::St2110(St2110 {
                network_interface: String::new(),
                local_ip: String::new(),
                remote_ip: String::new(),
                transport: st.transport,
                remote_port: 0,
                payload_type: st.payload_type,
                queues_cnt: 0,
            }),
            NodeStreamType::Mcm(mcm) => StreamType::Mcm(Mcm {
                conn_type: mcm.conn_type,
                transport: mcm.transport,
                transport_pixel_format: mcm.transport_pixel_format,
                ip: String::new(),
                port: 0,
                urn: mcm.urn,
            }),
        };

        Ok(Stream::new(payload, stream_type))
    }
}

/// Parse a node configuration document into a pipeline [`Config`].
///
/// Keys the pipeline does not use (`http_port`, `label`, ...) are ignored.
pub fn parse_node_config(s: &str) -> BcsResult<Config> {
    let file: NodeFile = serde_json::from_str(s)?;

    let senders = file
        .sender
        .into_iter()
        .map(NodeStream::into_stream)
        .collect::<BcsResult<Vec<_>>>()?;
    let receivers = file
        .receiver
        .into_iter()
        .map(NodeStream::into_stream)
        .collect::<BcsResult<Vec<_>>>()?;

    tracing::debug!(
        function = %file.function,
        senders = senders.len(),
        receivers = receivers.len(),
        "parsed node config"
    );

    Ok(Config {
        senders,
        receivers,
        function: file.function,
        multiviewer_columns: file.multiviewer_columns,
        gpu_hw_acceleration: file.gpu_hw_acceleration,
        gpu_hw_acceleration_device: file.gpu_hw_acceleration_device,
        stream_loop: file.stream_loop,
        logging_level: file.logging_level,
    })
}

/// Read and parse a node configuration file.
pub fn load_node_config(path: &Path) -> BcsResult<Config> {
    use anyhow::Context as _;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read node config '{}'", path.display()))?;
    parse_node_config(&text)
}

#[cfg(test)]
#[path = "../../tests/unit/config/node.rs"]
mod tests;
