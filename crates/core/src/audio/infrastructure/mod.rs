pub mod wav_codec;
