pub mod shared {
    pub mod constants;
    pub mod encode_settings;
    pub mod error;
    pub mod frame;
    pub mod frame_batch;
    pub mod host_folders;
    pub mod video_metadata;
}

pub mod audio {
    pub mod domain {
        pub mod audio_aligner;
        pub mod audio_track;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod audio_writer;
        pub mod thumbnail_encoder;
        pub mod video_reader;
        pub mod video_writer;
    }
    pub mod infrastructure;
}

pub mod nodes {
    pub mod flush_policy;
    pub mod frame_sink;
    pub mod frame_source;
    pub mod frame_timing;
    pub mod output_path;
    pub mod preview;
    pub mod sink_config;
}
