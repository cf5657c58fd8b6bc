//! TIFF/EXIF tag registry
//!
//! Maps the 16-bit tag ids the IFD walker understands to the field names used
//! as keys in [`crate::ExifData`]. Tags not listed here are skipped.

/// IFD0 (main image) tags
pub const IMAGE_WIDTH: u16 = 0x0100;
pub const IMAGE_LENGTH: u16 = 0x0101;
pub const BITS_PER_SAMPLE: u16 = 0x0102;
pub const COMPRESSION: u16 = 0x0103;
pub const PHOTOMETRIC_INTERPRETATION: u16 = 0x0106;
pub const IMAGE_DESCRIPTION: u16 = 0x010E;
pub const MAKE: u16 = 0x010F;
pub const MODEL: u16 = 0x0110;
pub const ORIENTATION: u16 = 0x0112;
pub const SAMPLES_PER_PIXEL: u16 = 0x0115;
pub const X_RESOLUTION: u16 = 0x011A;
pub const Y_RESOLUTION: u16 = 0x011B;
pub const RESOLUTION_UNIT: u16 = 0x0128;
pub const SOFTWARE: u16 = 0x0131;
pub const DATE_TIME: u16 = 0x0132;
pub const ARTIST: u16 = 0x013B;
pub const YCBCR_POSITIONING: u16 = 0x0213;
pub const COPYRIGHT: u16 = 0x8298;

/// Sub-IFD pointers, recorded as raw offsets and never followed
pub const EXIF_IFD_POINTER: u16 = 0x8769;
pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;

/// Every registered tag id with its field name
pub const REGISTRY: &[(u16, &str)] = &[
    (IMAGE_WIDTH, "ImageWidth"),
    (IMAGE_LENGTH, "ImageLength"),
    (BITS_PER_SAMPLE, "BitsPerSample"),
    (COMPRESSION, "Compression"),
    (PHOTOMETRIC_INTERPRETATION, "PhotometricInterpretation"),
    (IMAGE_DESCRIPTION, "ImageDescription"),
    (MAKE, "Make"),
    (MODEL, "Model"),
    (ORIENTATION, "Orientation"),
    (SAMPLES_PER_PIXEL, "SamplesPerPixel"),
    (X_RESOLUTION, "XResolution"),
    (Y_RESOLUTION, "YResolution"),
    (RESOLUTION_UNIT, "ResolutionUnit"),
    (SOFTWARE, "Software"),
    (DATE_TIME, "DateTime"),
    (ARTIST, "Artist"),
    (YCBCR_POSITIONING, "YCbCrPositioning"),
    (COPYRIGHT, "Copyright"),
    (EXIF_IFD_POINTER, "ExifIFDPointer"),
    (GPS_INFO_IFD_POINTER, "GPSInfoIFDPointer"),
];

/// Field name for a tag id, if the tag is registered
pub fn name_of(tag: u16) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|(id, _)| *id == tag)
        .map(|(_, name)| *name)
}
