// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The TWAIN header re-declared in the declarative model.
//!
//! Independent of [`crate::twain`]: the two are kept in step by hand and
//! [`crate::verify`] reports every place they disagree.

use crate::error::ModelError;
use crate::model::{field, FieldDef, FieldType, Platform, Scalar, Schema};

fn s(scalar: Scalar) -> FieldType {
    FieldType::Scalar(scalar)
}

fn r(name: &'static str) -> FieldType {
    FieldType::Record(name)
}

fn arr(elem: FieldType, len: usize) -> FieldType {
    FieldType::array(elem, len)
}

fn overlay(members: Vec<FieldDef>) -> FieldType {
    FieldType::Union(members)
}

/// Scalar typedef names and their model types.
pub fn twain_typedefs() -> Vec<(&'static str, FieldType)> {
    vec![
        ("TW_HANDLE", HANDLE),
        ("TW_MEMREF", MEMREF),
        ("TW_UINTPTR", UINTPTR),
        ("TW_STR32", str32()),
        ("TW_STR64", arr(INT8, 66)),
        ("TW_STR128", arr(INT8, 130)),
        ("TW_STR255", str255()),
        ("TW_INT8", INT8),
        ("TW_INT16", INT16),
        ("TW_INT32", INT32),
        ("TW_UINT8", UINT8),
        ("TW_UINT16", UINT16),
        ("TW_UINT32", UINT32),
        ("TW_BOOL", BOOL),
    ]
}

const HANDLE: FieldType = FieldType::Scalar(Scalar::Pointer);
const MEMREF: FieldType = FieldType::Scalar(Scalar::Pointer);
const UINTPTR: FieldType = FieldType::Scalar(Scalar::UIntPtr);
const INT8: FieldType = FieldType::Scalar(Scalar::I8);
const INT16: FieldType = FieldType::Scalar(Scalar::I16);
const INT32: FieldType = FieldType::Scalar(Scalar::I32);
const UINT8: FieldType = FieldType::Scalar(Scalar::U8);
const UINT16: FieldType = FieldType::Scalar(Scalar::U16);
const UINT32: FieldType = FieldType::Scalar(Scalar::U32);
const BOOL: FieldType = FieldType::Scalar(Scalar::U16);
const FNPTR: FieldType = FieldType::Scalar(Scalar::Pointer);

fn str32() -> FieldType {
    arr(INT8, 34)
}

fn str255() -> FieldType {
    arr(INT8, 256)
}

/// Size of a scalar typedef on `platform`, computed from the model.
pub fn typedef_size(platform: &Platform, name: &str) -> Option<usize> {
    let schema = Schema::new(*platform).ok()?;
    let (_, ty) = twain_typedefs().into_iter().find(|(n, _)| *n == name)?;
    let slot = schema.record("slot", vec![field("value", ty)]);
    slot.layout("slot").ok()?.fields.first().map(|f| f.size)
}

/// Every TWAIN struct for `platform`, in header order.
pub fn twain_schema(platform: Platform) -> Result<Schema, ModelError> {
    // Apple declares these as pointers; everyone else as TW_UINT32.
    let id = if platform.apple { MEMREF } else { UINT32 };

    let schema = Schema::new(platform)?
        .record("TW_FIX32", vec![field("Whole", INT16), field("Frac", UINT16)])
        .record(
            "TW_FRAME",
            vec![
                field("Left", r("TW_FIX32")),
                field("Top", r("TW_FIX32")),
                field("Right", r("TW_FIX32")),
                field("Bottom", r("TW_FIX32")),
            ],
        )
        .record(
            "TW_DECODEFUNCTION",
            [
                "StartIn",
                "BreakIn",
                "EndIn",
                "StartOut",
                "BreakOut",
                "EndOut",
                "Gamma",
                "SampleCount",
            ]
            .into_iter()
            .map(|name| field(name, r("TW_FIX32")))
            .collect(),
        )
        .record(
            "TW_TRANSFORMSTAGE",
            vec![
                field("Decode", arr(r("TW_DECODEFUNCTION"), 3)),
                field("Mix", arr(arr(r("TW_FIX32"), 3), 3)),
            ],
        )
        .record(
            "TW_ARRAY",
            vec![
                field("ItemType", UINT16),
                field("NumItems", UINT32),
                field("ItemList", arr(UINT8, 1)),
            ],
        )
        .record(
            "TW_AUDIOINFO",
            vec![field("Name", str255()), field("Reserved", UINT32)],
        )
        .record(
            "TW_CALLBACK",
            vec![
                field("CallBackProc", MEMREF),
                field("RefCon", id.clone()),
                field("Message", INT16),
            ],
        )
        .record(
            "TW_CALLBACK2",
            vec![
                field("CallBackProc", MEMREF),
                field("RefCon", UINTPTR),
                field("Message", INT16),
            ],
        )
        .record(
            "TW_CAPABILITY",
            vec![
                field("Cap", UINT16),
                field("ConType", UINT16),
                field("hContainer", HANDLE),
            ],
        )
        .record(
            "TW_CIEPOINT",
            vec![
                field("X", r("TW_FIX32")),
                field("Y", r("TW_FIX32")),
                field("Z", r("TW_FIX32")),
            ],
        )
        .record(
            "TW_CIECOLOR",
            vec![
                field("ColorSpace", UINT16),
                field("LowEndian", INT16),
                field("DeviceDependent", INT16),
                field("VersionNumber", INT32),
                field("StageABC", r("TW_TRANSFORMSTAGE")),
                field("StageLMN", r("TW_TRANSFORMSTAGE")),
                field("WhitePoint", r("TW_CIEPOINT")),
                field("BlackPoint", r("TW_CIEPOINT")),
                field("WhitePaper", r("TW_CIEPOINT")),
                field("BlackInk", r("TW_CIEPOINT")),
                field("Samples", arr(r("TW_FIX32"), 1)),
            ],
        )
        .record(
            "TW_CUSTOMDSDATA",
            vec![field("InfoLength", UINT32), field("hData", HANDLE)],
        )
        .record(
            "TW_DEVICEEVENT",
            vec![
                field("Event", UINT32),
                field("DeviceName", str255()),
                field("BatteryMinutes", UINT32),
                field("BatteryPercentage", INT16),
                field("PowerSupply", INT32),
                field("XResolution", r("TW_FIX32")),
                field("YResolution", r("TW_FIX32")),
                field("FlashUsed2", UINT32),
                field("AutomaticCapture", UINT32),
                field("TimeBeforeFirstCapture", UINT32),
                field("TimeBetweenCaptures", UINT32),
            ],
        )
        .record(
            "TW_ELEMENT8",
            vec![
                field("Index", UINT8),
                field("Channel1", UINT8),
                field("Channel2", UINT8),
                field("Channel3", UINT8),
            ],
        )
        .record(
            "TW_ENUMERATION",
            vec![
                field("ItemType", UINT16),
                field("NumItems", UINT32),
                field("CurrentIndex", UINT32),
                field("DefaultIndex", UINT32),
                field("ItemList", arr(UINT8, 1)),
            ],
        )
        .record(
            "TW_EVENT",
            vec![field("pEvent", MEMREF), field("TWMessage", UINT16)],
        )
        .record(
            "TW_INFO",
            vec![
                field("InfoID", UINT16),
                field("ItemType", UINT16),
                field("NumItems", UINT16),
                field(
                    "Code",
                    overlay(vec![field("ReturnCode", UINT16), field("CondCode", UINT16)]),
                ),
                field("Item", UINTPTR),
            ],
        )
        .record(
            "TW_EXTIMAGEINFO",
            vec![field("NumInfos", UINT32), field("Info", arr(r("TW_INFO"), 1))],
        )
        .record(
            "TW_FILESYSTEM",
            vec![
                field("InputName", str255()),
                field("OutputName", str255()),
                field("Context", MEMREF),
                field(
                    "Subdirs",
                    overlay(vec![
                        field("Recursive", s(Scalar::Int)),
                        field("Subdirectories", BOOL),
                    ]),
                ),
                field(
                    "Kind",
                    overlay(vec![field("FileType", INT32), field("FileSystemType", UINT32)]),
                ),
                field("Size", UINT32),
                field("CreateTimeDate", str32()),
                field("ModifiedTimeDate", str32()),
                field("FreeSpace", UINT32),
                field("NewImageSize", INT32),
                field("NumberOfFiles", UINT32),
                field("NumberOfSnippets", UINT32),
                field("DeviceGroupMask", UINT32),
                field("Reserved", arr(INT8, 508)),
            ],
        )
        .record(
            "TW_GRAYRESPONSE",
            vec![field("Response", arr(r("TW_ELEMENT8"), 1))],
        )
        .record(
            "TW_VERSION",
            vec![
                field("MajorNum", UINT16),
                field("MinorNum", UINT16),
                field("Language", UINT16),
                field("Country", UINT16),
                field("Info", str32()),
            ],
        )
        .record(
            "TW_IDENTITY",
            vec![
                field("Id", id),
                field("Version", r("TW_VERSION")),
                field("ProtocolMajor", UINT16),
                field("ProtocolMinor", UINT16),
                field("SupportedGroups", UINT32),
                field("Manufacturer", str32()),
                field("ProductFamily", str32()),
                field("ProductName", str32()),
            ],
        )
        .record(
            "TW_IMAGEINFO",
            vec![
                field("XResolution", r("TW_FIX32")),
                field("YResolution", r("TW_FIX32")),
                field("ImageWidth", INT32),
                field("ImageLength", INT32),
                field("SamplesPerPixel", INT16),
                field("BitsPerSample", arr(INT16, 8)),
                field("BitsPerPixel", INT16),
                field("Planar", BOOL),
                field("PixelType", INT16),
                field("Compression", UINT16),
            ],
        )
        .record(
            "TW_IMAGELAYOUT",
            vec![
                field("Frame", r("TW_FRAME")),
                field("DocumentNumber", UINT32),
                field("PageNumber", UINT32),
                field("FrameNumber", UINT32),
            ],
        )
        .record(
            "TW_MEMORY",
            vec![
                field("Flags", UINT32),
                field("Length", UINT32),
                field("TheMem", MEMREF),
            ],
        )
        .record(
            "TW_IMAGEMEMXFER",
            vec![
                field("Compression", UINT16),
                field("BytesPerRow", UINT32),
                field("Columns", UINT32),
                field("Rows", UINT32),
                field("XOffset", UINT32),
                field("YOffset", UINT32),
                field("BytesWritten", UINT32),
                field("Memory", r("TW_MEMORY")),
            ],
        )
        .record(
            "TW_JPEGCOMPRESSION",
            vec![
                field("ColorSpace", UINT16),
                field("SubSampling", UINT32),
                field("NumComponents", UINT16),
                field("RestartFrequency", UINT16),
                field("QuantMap", arr(UINT16, 4)),
                field("QuantTable", arr(r("TW_MEMORY"), 4)),
                field("HuffmanMap", arr(UINT16, 4)),
                field("HuffmanDC", arr(r("TW_MEMORY"), 2)),
                field("HuffmanAC", arr(r("TW_MEMORY"), 2)),
            ],
        )
        .record(
            "TW_METRICS",
            vec![
                field("SizeOf", UINT32),
                field("ImageCount", UINT32),
                field("SheetCount", UINT32),
            ],
        )
        .record(
            "TW_ONEVALUE",
            vec![field("ItemType", UINT16), field("Item", UINT32)],
        )
        .record(
            "TW_PALETTE8",
            vec![
                field("NumColors", UINT16),
                field("PaletteType", UINT16),
                field("Colors", arr(r("TW_ELEMENT8"), 256)),
            ],
        )
        .record(
            "TW_PASSTHRU",
            vec![
                field("pCommand", MEMREF),
                field("CommandBytes", UINT32),
                field("Direction", INT32),
                field("pData", MEMREF),
                field("DataBytes", UINT32),
                field("DataBytesXfered", UINT32),
            ],
        )
        .record(
            "TW_PENDINGXFERS",
            vec![
                field("Count", UINT16),
                field(
                    "JobControl",
                    overlay(vec![field("EOJ", UINT32), field("Reserved", UINT32)]),
                ),
            ],
        )
        .record(
            "TW_RANGE",
            vec![
                field("ItemType", UINT16),
                field("MinValue", UINT32),
                field("MaxValue", UINT32),
                field("StepSize", UINT32),
                field("DefaultValue", UINT32),
                field("CurrentValue", UINT32),
            ],
        )
        .record(
            "TW_RGBRESPONSE",
            vec![field("Response", arr(r("TW_ELEMENT8"), 1))],
        )
        .record(
            "TW_SETUPFILEXFER",
            vec![
                field("FileName", str255()),
                field("Format", UINT16),
                field("VRefNum", INT16),
            ],
        )
        .record(
            "TW_SETUPMEMXFER",
            vec![
                field("MinBufSize", UINT32),
                field("MaxBufSize", UINT32),
                field("Preferred", UINT32),
            ],
        )
        .record(
            "TW_STATUS",
            vec![
                field("ConditionCode", UINT16),
                field(
                    "Detail",
                    overlay(vec![field("Data", UINT16), field("Reserved", UINT16)]),
                ),
            ],
        )
        .record(
            "TW_STATUSUTF8",
            vec![
                field("Status", r("TW_STATUS")),
                field("Size", UINT32),
                field("UTF8string", HANDLE),
            ],
        )
        .record(
            "TW_TWAINDIRECT",
            vec![
                field("SizeOf", UINT32),
                field("CommunicationManager", UINT16),
                field("Send", HANDLE),
                field("SendSize", UINT32),
                field("Receive", HANDLE),
                field("ReceiveSize", UINT32),
            ],
        )
        .record(
            "TW_USERINTERFACE",
            vec![
                field("ShowUI", BOOL),
                field("ModalUI", BOOL),
                field("hParent", HANDLE),
            ],
        )
        .record(
            "TW_ENTRYPOINT",
            vec![
                field("Size", UINT32),
                field("DSM_Entry", FNPTR),
                field("DSM_MemAllocate", FNPTR),
                field("DSM_MemFree", FNPTR),
                field("DSM_MemLock", FNPTR),
                field("DSM_MemUnlock", FNPTR),
            ],
        )
        .record(
            "TW_FILTER_DESCRIPTOR",
            [
                "Size",
                "HueStart",
                "HueEnd",
                "SaturationStart",
                "SaturationEnd",
                "ValueStart",
                "ValueEnd",
                "Replacement",
            ]
            .into_iter()
            .map(|name| field(name, UINT32))
            .collect(),
        )
        .record(
            "TW_FILTER",
            vec![
                field("Size", UINT32),
                field("DescriptorCount", UINT32),
                field("MaxDescriptorCount", UINT32),
                field("Condition", UINT32),
                field("hDescriptors", HANDLE),
            ],
        );

    Ok(schema)
}
