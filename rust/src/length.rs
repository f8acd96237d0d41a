extern crate libc;
extern crate glib;

use self::glib::translate::*;

use strtod::*;

/* Keep this in sync with ../../rsvg-private.h:LengthUnit */
#[repr(C)]
#[derive(Debug, PartialEq)]
pub enum LengthUnit {
    Default,
    Percent,
    FontEm,
    FontEx,
    Inch,
    RelativeLarger,
    RelativeSmaller
}

/* Keep this in sync with ../../rsvg-private.h:LengthDir */
#[repr(C)]
#[derive(Debug, PartialEq)]
pub enum LengthDir {
    Horizontal,
    Vertical,
    Both
}

/* This is *not* an opaque struct; it is actually visible to the C code.  It is so
 * that the remaining C code can create RsvgLength values as part of existing
 * structures or objects, without allocations on the heap.
 */
/* Keep this in sync with ../../rsvg-private.h:RsvgLength */
#[repr(C)]
#[derive(Debug, PartialEq)]
pub struct RsvgLength {
    length: f64,
    unit: LengthUnit,
    dir: LengthDir
}

pub enum RsvgDrawingCtx {}

const POINTS_PER_INCH: f64 = 72.0;
const CM_PER_INCH:     f64 = 2.54;
const MM_PER_INCH:     f64 = 25.4;
const PICA_PER_INCH:   f64 = 6.0;

fn compute_named_size (name: &str) -> f64 {
    let power: f64;

    match name {
        "xx-small" => { power = -3.0; },
        "x-small"  => { power = -2.0; },
        "small"    => { power = -1.0; },
        "medium"   => { power = 0.0; },
        "large"    => { power = 1.0; },
        "x-large"  => { power = 2.0; },
        "xx-large" => { power = 3.0; },
        _          => { return 0.0; }
    }

    12.0 * 1.2f64.powf (power) / POINTS_PER_INCH
}

#[no_mangle]
pub extern fn rsvg_length_parse (string: *const libc::c_char, dir: LengthDir) -> RsvgLength {
    let my_string = unsafe { &String::from_glib_none (string) };

    parse_length (my_string, dir)
}

/* https://www.w3.org/TR/SVG/types.html#DataTypeLength
 * https://www.w3.org/TR/2008/REC-CSS2-20080411/syndata.html#length-units
 *
 * Lengths have units.  When they need to be need resolved to
 * units in the user's coordinate system, some unit types
 * need to know if they are horizontal/vertical/both.  For example,
 * a some_object.width="50%" is 50% with respect to the current
 * viewport's width.  In this case, the @dir argument is used
 * when _rsvg_css_normalize_length() needs to know to what the
 * length refers.
 */
pub fn parse_length (string: &str, dir: LengthDir) -> RsvgLength {
    let unit: LengthUnit;

    let (mut value, rest) = strtod (string);

    match rest.as_ref () {
        "%" => {
            value *= 0.01; // normalize to [0, 1]
            unit = LengthUnit::Percent;
        },

        "em" => {
            unit = LengthUnit::FontEm;
        },

        "ex" => {
            unit = LengthUnit::FontEx;
        },

        "pt" => {
            value /= POINTS_PER_INCH;
            unit = LengthUnit::Inch;
        },

        "in" => {
            unit = LengthUnit::Inch;
        },

        "cm" => {
            value /= CM_PER_INCH;
            unit = LengthUnit::Inch;
        },

        "mm" => {
            value /= MM_PER_INCH;
            unit = LengthUnit::Inch;
        },

        "pc" => {
            value /= PICA_PER_INCH;
            unit = LengthUnit::Inch;
        },

        "larger" => {
            unit = LengthUnit::RelativeLarger;
        },

        "smaller" => {
            unit = LengthUnit::RelativeSmaller;
        },

        "xx-small" |
        "x-small" |
        "small" |
        "medium" |
        "large" |
        "x-large" |
        "xx-large" => {
            value = compute_named_size (rest);
            unit = LengthUnit::Inch;
        },

        _ => {
            unit = LengthUnit::Default;
        }
    }

    RsvgLength {
        length: value,
        unit: unit,
        dir: dir
    }
}

#[no_mangle]
pub extern fn rsvg_length_normalize (length: *const RsvgLength, draw_ctx: *const RsvgDrawingCtx) -> f64 {
    unimplemented! ();
}

#[no_mangle]
pub extern fn rsvg_length_hand_normalize (length: *const RsvgLength,
                                          pixels_per_inch: f64,
                                          width_or_height: f64,
                                          font_size: f64) -> f64 {
    unimplemented! ();
}
