pub mod backend;
pub mod file;
pub mod stream;
pub mod synthetic;
pub mod wav;

pub use backend::{
    AudioFrame, CaptureError, CaptureProvider, CaptureProviderFactory, CaptureSettings,
    CaptureSourceKind, CaptureStream, DeniedCaptureProvider, MediaConstraints, MediaKind,
    Recording, RecordingInfo,
};
pub use file::FileCaptureProvider;
pub use stream::{FrameSource, PacedStream};
pub use synthetic::SyntheticCaptureProvider;
pub use wav::{encode_frames, AudioFile, EncodedAudio};
