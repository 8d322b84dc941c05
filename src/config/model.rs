use std::{fmt, path::Path, str::FromStr};

use crate::foundation::error::{BcsError, BcsResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
/// Frame rate as an exact rational.
pub struct FrameRate {
    /// Frames per `denominator` seconds.
    pub numerator: u32,
    /// Must be > 0 wherever the rate reaches the command line.
    pub denominator: u32,
}

impl FrameRate {
    /// Build a frame rate without validation; see [`FrameRate::validate`].
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Reject a zero denominator.
    pub fn validate(self) -> BcsResult<()> {
        if self.denominator == 0 {
            return Err(BcsError::validation(format!(
                "frame rate {}/0 has a zero denominator",
                self.numerator
            )));
        }
        Ok(())
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// How a video payload is described on the command line.
///
/// Serialized as the bare string the pipeline JSON has always used: `"rawvideo"`, a codec name,
/// or `""`.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VideoType {
    /// Uncompressed frames, fully described by size/pixel format/rate.
    Raw,
    /// Encoded video selected by codec name (`x264`, `hevc_qsv`, ...).
    Codec(String),
    /// No explicit codec or format; the container implied by the file name decides.
    #[default]
    Unspecified,
}

impl VideoType {
    /// Sentinel string selecting [`VideoType::Raw`].
    pub const RAW: &'static str = "rawvideo";

    /// String form used in configs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Raw => Self::RAW,
            Self::Codec(name) => name,
            Self::Unspecified => "",
        }
    }
}

impl From<String> for VideoType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unspecified,
            Self::RAW => Self::Raw,
            _ => Self::Codec(value),
        }
    }
}

impl From<&str> for VideoType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<VideoType> for String {
    fn from(value: VideoType) -> Self {
        match value {
            VideoType::Codec(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Video payload parameters.
pub struct Video {
    /// Frame width in pixels.
    pub frame_width: u32,
    /// Frame height in pixels.
    pub frame_height: u32,
    /// Frame rate.
    pub frame_rate: FrameRate,
    /// Pixel format name, e.g. `yuv422p10le`.
    pub pixel_format: String,
    /// Raw, codec or unspecified.
    #[serde(default)]
    pub video_type: VideoType,
    /// Codec preset, only meaningful with [`VideoType::Codec`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Codec profile, only meaningful with [`VideoType::Codec`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Video {
    /// Uncompressed video of the given geometry.
    pub fn raw(
        frame_width: u32,
        frame_height: u32,
        frame_rate: FrameRate,
        pixel_format: impl Into<String>,
    ) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_rate,
            pixel_format: pixel_format.into(),
            video_type: VideoType::Raw,
            preset: None,
            profile: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
/// Audio payload parameters. Carried through configs; no pipeline can consume it yet.
pub struct Audio {
    /// Channel count.
    pub channels: u32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sample format, e.g. `s24be`.
    pub format: String,
    /// Packet time, e.g. `1ms`.
    pub packet_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Media carried by a stream.
pub enum Payload {
    /// Video frames.
    Video(Video),
    /// Audio samples.
    Audio(Audio),
}

impl Payload {
    /// Short name of the media kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Video(_) => "video",
            Self::Audio(_) => "audio",
        }
    }

    /// Video parameters, if this is a video payload.
    pub fn as_video(&self) -> Option<&Video> {
        match self {
            Self::Video(video) => Some(video),
            Self::Audio(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
/// A file endpoint.
pub struct File {
    /// Directory, may be empty.
    #[serde(default)]
    pub path: String,
    /// File name inside `path`.
    pub filename: String,
}

impl File {
    /// `path` and `filename` joined with exactly one `/` (none when `path` is empty).
    pub fn location(&self) -> String {
        let mut out = String::with_capacity(self.path.len() + 1 + self.filename.len());
        out.push_str(&self.path);
        if !self.path.is_empty() && !self.path.ends_with('/') {
            out.push('/');
        }
        out.push_str(&self.filename);
        out
    }
}

/// SMPTE ST 2110 essence transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum St2110Transport {
    /// ST 2110-20, uncompressed video.
    St20,
    /// ST 2110-22, compressed (JPEG XS) video.
    St22,
    /// ST 2110-30, PCM audio.
    St30,
}

impl St2110Transport {
    /// Config spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::St20 => "st2110-20",
            Self::St22 => "st2110-22",
            Self::St30 => "st2110-30",
        }
    }

    /// Muxer/demuxer name the engine registers for this transport.
    pub fn mtl_format(self) -> &'static str {
        match self {
            Self::St20 => "mtl_st20p",
            Self::St22 => "mtl_st22p",
            Self::St30 => "mtl_st30p",
        }
    }
}

impl FromStr for St2110Transport {
    type Err = BcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "st2110-20" => Ok(Self::St20),
            "st2110-22" => Ok(Self::St22),
            "st2110-30" => Ok(Self::St30),
            other => Err(BcsError::unsupported(format!(
                "st2110 transport '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for St2110Transport {
    type Error = BcsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<St2110Transport> for String {
    fn from(value: St2110Transport) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for St2110Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// ST 2110 network endpoint handled by the MTL plugins.
pub struct St2110 {
    /// VFIO port address, e.g. `0000:4b:11.0`.
    pub network_interface: String,
    /// Address of the local port.
    pub local_ip: String,
    /// Source address when receiving, destination when sending.
    pub remote_ip: String,
    /// Essence transport.
    pub transport: St2110Transport,
    /// UDP port.
    pub remote_port: u16,
    /// RTP payload type.
    pub payload_type: u8,
    /// Queue count; 0 leaves the plugin default.
    #[serde(default)]
    pub queues_cnt: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
/// Media Communications Mesh endpoint.
pub struct Mcm {
    /// Connection type, e.g. `st2110` or `multipoint-group`.
    pub conn_type: String,
    /// Transport name, e.g. `st2110-20`.
    pub transport: String,
    /// Wire pixel format, only used with the `st2110-20` transport.
    #[serde(default)]
    pub transport_pixel_format: String,
    /// Peer address.
    pub ip: String,
    /// Peer port.
    pub port: u16,
    /// Resource name; kept for round trips, never put on the command line.
    #[serde(default)]
    pub urn: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Transport of a stream endpoint.
pub enum StreamType {
    /// Local file.
    File(File),
    /// ST 2110 over MTL.
    St2110(St2110),
    /// Media Communications Mesh.
    Mcm(Mcm),
}

impl StreamType {
    /// Short name of the transport kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::St2110(_) => "st2110",
            Self::Mcm(_) => "mcm",
        }
    }

    /// Whether this endpoint is a local file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One endpoint of media: what it carries and how it is reached.
pub struct Stream {
    /// Media description.
    pub payload: Payload,
    /// Endpoint transport.
    pub stream_type: StreamType,
}

impl Stream {
    /// Pair a payload with a transport.
    pub fn new(payload: Payload, stream_type: StreamType) -> Self {
        Self {
            payload,
            stream_type,
        }
    }
}

/// Pipeline topology selected by [`Config::function`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Function {
    /// Relay, named from the network sender side.
    Tx,
    /// Relay, named from the network receiver side.
    Rx,
    /// Composite N inputs into one grid.
    Multiviewer,
    /// Fan one input out to N scaled outputs.
    Recorder,
    /// Fixed 2x super-resolution.
    Upscale,
}

impl Function {
    /// Config spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tx => "tx",
            Self::Rx => "rx",
            Self::Multiviewer => "multiviewer",
            Self::Recorder => "recorder",
            Self::Upscale => "upscale",
        }
    }
}

impl FromStr for Function {
    type Err = BcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tx" => Ok(Self::Tx),
            "rx" => Ok(Self::Rx),
            "multiviewer" => Ok(Self::Multiviewer),
            "recorder" => Ok(Self::Recorder),
            "upscale" => Ok(Self::Upscale),
            other => Err(BcsError::unsupported(format!("function '{other}'"))),
        }
    }
}

impl TryFrom<String> for Function {
    type Error = BcsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Function> for String {
    fn from(value: Function) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPU acceleration mode.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum GpuAcceleration {
    /// Software only.
    #[default]
    None,
    /// Intel QSV; needs a render device path.
    Intel,
    /// NVIDIA CUDA.
    Nvidia,
}

impl GpuAcceleration {
    /// Config spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Intel => "intel",
            Self::Nvidia => "nvidia",
        }
    }
}

impl FromStr for GpuAcceleration {
    type Err = BcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "intel" => Ok(Self::Intel),
            "nvidia" => Ok(Self::Nvidia),
            other => Err(BcsError::unsupported(format!(
                "gpu acceleration '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for GpuAcceleration {
    type Error = BcsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GpuAcceleration> for String {
    fn from(value: GpuAcceleration) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A complete pipeline request.
///
/// For [`Function::Tx`] and [`Function::Rx`] the lists pair up by index: `receivers[i]` is the
/// engine input feeding `senders[i]`.
pub struct Config {
    /// Engine outputs.
    #[serde(default)]
    pub senders: Vec<Stream>,
    /// Engine inputs.
    #[serde(default)]
    pub receivers: Vec<Stream>,
    /// Topology.
    pub function: Function,
    /// Grid columns for [`Function::Multiviewer`].
    #[serde(default)]
    pub multiviewer_columns: u32,
    /// Acceleration mode.
    #[serde(default)]
    pub gpu_hw_acceleration: GpuAcceleration,
    /// Render device, required with [`GpuAcceleration::Intel`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_hw_acceleration_device: Option<String>,
    /// Input loop count; 0 disables, negative loops forever.
    #[serde(default)]
    pub stream_loop: i32,
    /// Values > 0 turn on engine debug output.
    #[serde(default)]
    pub logging_level: i32,
}

impl Config {
    /// Empty config for `function`; streams are pushed by the caller.
    pub fn new(function: Function) -> Self {
        Self {
            senders: Vec::new(),
            receivers: Vec::new(),
            function,
            multiviewer_columns: 0,
            gpu_hw_acceleration: GpuAcceleration::None,
            gpu_hw_acceleration_device: None,
            stream_loop: 0,
            logging_level: 0,
        }
    }

    /// Parse a pipeline config from JSON text.
    pub fn from_json(s: &str) -> BcsResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> BcsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read and parse a pipeline config file.
    pub fn from_path(path: &Path) -> BcsResult<Self> {
        use anyhow::Context as _;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
